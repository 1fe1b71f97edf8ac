//! Index-cycling carousel used for the hero slides and featured posts.
//!
//! A [`Carousel`] owns a non-empty, fixed sequence and an active index in
//! `[0, len)`. It starts at 0 and moves only through [`Carousel::next`],
//! [`Carousel::previous`] (both wrap around) and [`Carousel::select`].
//! There is no terminal state.
//!
//! Autoplay lives outside the carousel. [`Autoplay`] holds the tick interval
//! written into the hero markup; the page script calls the same wrap-around
//! step once per tick.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CarouselError {
    #[error("a carousel needs at least one item")]
    Empty,
    #[error("index {index} is out of range for a carousel of {len} items")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Carousel<T> {
    items: Vec<T>,
    active: usize,
}

impl<T> Carousel<T> {
    /// Build a carousel positioned on the first item. Empty input is rejected.
    pub fn new(items: Vec<T>) -> Result<Self, CarouselError> {
        if items.is_empty() {
            return Err(CarouselError::Empty);
        }
        Ok(Self { items, active: 0 })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &T {
        &self.items[self.active]
    }

    /// Index `next()` would move to.
    pub fn next_index(&self) -> usize {
        (self.active + 1) % self.len()
    }

    /// Index `previous()` would move to.
    pub fn previous_index(&self) -> usize {
        (self.active + self.len() - 1) % self.len()
    }

    pub fn next(&mut self) {
        self.active = self.next_index();
    }

    pub fn previous(&mut self) {
        self.active = self.previous_index();
    }

    /// Jump to `index`. Out-of-range input is rejected and the active index
    /// is left as it was.
    pub fn select(&mut self, index: usize) -> Result<(), CarouselError> {
        if index >= self.len() {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        self.active = index;
        Ok(())
    }
}

/// Tick interval for a carousel advanced by a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autoplay {
    interval: Duration,
}

impl Autoplay {
    /// A zero interval is bumped to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Interval in whole milliseconds, as the page script reads it.
    pub fn millis(&self) -> u128 {
        self.interval.as_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn posts() -> Carousel<&'static str> {
        Carousel::new(vec!["vice chancellor", "strategic plan", "iso audit"]).unwrap()
    }

    #[test]
    fn starts_at_zero() {
        let c = posts();
        assert_eq!(c.active_index(), 0);
        assert_eq!(*c.active(), "vice chancellor");
        assert!(!c.is_empty());
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        let mut c = posts();
        c.previous();
        assert_eq!(c.active_index(), 2);
        assert_eq!(*c.active(), "iso audit");
    }

    #[test]
    fn next_from_last_wraps_to_zero() {
        let mut c = posts();
        c.select(2).unwrap();
        c.next();
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn peek_indices_do_not_move() {
        let c = posts();
        assert_eq!(c.next_index(), 1);
        assert_eq!(c.previous_index(), 2);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn single_item_stays_put() {
        let mut c = Carousel::new(vec![()]).unwrap();
        c.next();
        assert_eq!(c.active_index(), 0);
        c.previous();
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(Carousel::<u8>::new(vec![]).unwrap_err(), CarouselError::Empty);
    }

    #[test]
    fn out_of_range_select_is_rejected() {
        let mut c = posts();
        c.select(1).unwrap();
        assert_eq!(
            c.select(3).unwrap_err(),
            CarouselError::OutOfRange { index: 3, len: 3 }
        );
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn autoplay_zero_interval_clamped() {
        assert_eq!(Autoplay::new(Duration::ZERO).millis(), 1);
        assert_eq!(Autoplay::from_millis(0).millis(), 1);
        assert_eq!(Autoplay::from_millis(5000).millis(), 5000);
    }

    proptest! {
        #[test]
        fn next_then_previous_round_trips(len in 1usize..50, start in 0usize..50) {
            let mut c = Carousel::new(vec![(); len]).unwrap();
            c.select(start % len).unwrap();
            c.next();
            c.previous();
            prop_assert_eq!(c.active_index(), start % len);
            c.previous();
            c.next();
            prop_assert_eq!(c.active_index(), start % len);
        }

        #[test]
        fn full_cycle_returns_home(len in 1usize..50, start in 0usize..50) {
            let mut c = Carousel::new(vec![(); len]).unwrap();
            c.select(start % len).unwrap();
            for _ in 0..len {
                c.next();
            }
            prop_assert_eq!(c.active_index(), start % len);
        }

        #[test]
        fn index_always_in_range(len in 1usize..20, moves in prop::collection::vec(any::<bool>(), 0..60)) {
            let mut c = Carousel::new(vec![(); len]).unwrap();
            for forward in moves {
                if forward { c.next() } else { c.previous() }
                prop_assert!(c.active_index() < len);
            }
        }
    }
}
