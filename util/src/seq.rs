/// A finite, forward-only sequence that knows how many items are left and can
/// skip ahead without producing the skipped items.
///
/// Implementors should route [`Iterator::nth`] through [`LazySeq::advance`] so
/// that generic consumers (`skip`, `nth`, `step_by`) skip in constant time too.
pub trait LazySeq: ExactSizeIterator + Sized {
    /// Skips `n` items, stopping at the end when fewer remain.
    fn advance(&mut self, n: usize);

    fn has_next(&self) -> bool {
        self.len() != 0
    }

    fn remaining(&self) -> usize {
        self.len()
    }

    fn to_vec(self) -> Vec<Self::Item> {
        let mut items = Vec::with_capacity(self.len());
        items.extend(self);
        items
    }
}

#[cfg(test)]
mod test {
    use crate::seq::LazySeq;

    struct Countdown(usize);

    impl Iterator for Countdown {
        type Item = usize;

        fn next(&mut self) -> Option<usize> {
            self.0.checked_sub(1).inspect(|next| self.0 = *next)
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (self.0, Some(self.0))
        }

        fn nth(&mut self, n: usize) -> Option<usize> {
            self.advance(n);
            self.next()
        }
    }

    impl ExactSizeIterator for Countdown {}

    impl LazySeq for Countdown {
        fn advance(&mut self, n: usize) {
            self.0 = self.0.saturating_sub(n);
        }
    }

    #[test]
    fn contract() {
        let mut seq = Countdown(5);
        assert!(seq.has_next());
        assert_eq!(seq.remaining(), 5);
        assert_eq!(seq.nth(1), Some(3));
        seq.advance(1);
        assert_eq!(seq.to_vec(), [1, 0]);

        let mut seq = Countdown(2);
        seq.advance(10);
        assert!(!seq.has_next());
        assert_eq!(seq.next(), None);
    }
}
