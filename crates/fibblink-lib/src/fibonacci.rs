//! Fibonacci cursor driving the blink loop.

/// The last three terms of the sequence, newest in `current`.
///
/// Starts at the term 0, so successive values are 0, 1, 1, 2, 3, 5, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FibonacciCursor {
    previous: u64,
    current: u64,
    next: Option<u64>,
}

impl Default for FibonacciCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl FibonacciCursor {
    pub fn new() -> Self {
        FibonacciCursor {
            previous: 1,
            current: 0,
            next: Some(1),
        }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    /// Whether the newest term is within `bound`. Negative bounds admit nothing.
    pub fn within(&self, bound: i64) -> bool {
        u64::try_from(bound).is_ok_and(|b| self.current <= b)
    }

    /// Shift the registers by one term. Returns `false` when the next term
    /// would overflow `u64`; the cursor then stays put.
    pub fn advance(&mut self) -> bool {
        let Some(next) = self.next else {
            return false;
        };
        self.previous = self.current;
        self.current = next;
        self.next = self.previous.checked_add(self.current);
        true
    }
}

/// Terms of the sequence that are `<= bound`, in order.
pub fn terms_up_to(bound: i64) -> impl Iterator<Item = u64> {
    let mut cursor = FibonacciCursor::new();
    let mut done = false;
    std::iter::from_fn(move || {
        if done || !cursor.within(bound) {
            return None;
        }
        let term = cursor.current;
        done = !cursor.advance();
        Some(term)
    })
}
