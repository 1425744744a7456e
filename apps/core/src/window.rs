use std::collections::VecDeque;

/// Number of readings kept per scalar series.
pub const WINDOW_CAPACITY: usize = 20;

/// Fixed-capacity FIFO of the most recent readings.
///
/// Pushing past capacity drops the oldest entry, so the window always holds
/// the last `capacity` values in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindow<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> SlidingWindow<T> {
    pub fn new() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }

    /// A zero capacity is bumped to one so the newest reading is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends `value`, returning the evicted oldest entry on overflow.
    pub fn push(&mut self, value: T) -> Option<T> {
        self.items.push_back(value);
        if self.items.len() > self.capacity {
            self.items.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Plot x coordinates `0..len`, regenerated on every call.
    #[allow(clippy::cast_precision_loss)]
    pub fn index_sequence(&self) -> Vec<f64> {
        (0..self.items.len()).map(|index| index as f64).collect()
    }
}

impl<T: Clone> SlidingWindow<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl SlidingWindow<f64> {
    /// Smallest and largest reading, `None` while empty.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.items.iter().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        }))
    }

    /// Axis range padded by `margin` on both sides.
    ///
    /// Only produced once the window holds more than one reading; a single
    /// point leaves the axis to the renderer.
    pub fn padded_range(&self, margin: f64) -> Option<[f64; 2]> {
        if self.items.len() <= 1 {
            return None;
        }
        self.bounds().map(|(min, max)| [min - margin, max + margin])
    }
}

impl<T> Default for SlidingWindow<T> {
    fn default() -> Self {
        Self::new()
    }
}
