use super::probe::ProbeReading;
use bevy::prelude::*;
use std::collections::VecDeque;

// ProbeTrace hält die letzten Messwerte der Sonde für das Playback-Panel.
#[derive(Resource, Debug)]
pub struct ProbeTrace {
    pub readings: VecDeque<ProbeReading>,
    pub max_size: usize,
}

impl ProbeTrace {
    pub fn new(max_size: usize) -> Self {
        Self {
            readings: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    pub fn push(&mut self, reading: ProbeReading) {
        if self.max_size == 0 {
            return;
        }
        while self.readings.len() >= self.max_size {
            self.readings.pop_front(); // ältester Wert fliegt raus
        }
        self.readings.push_back(reading);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn clear(&mut self) {
        self.readings.clear();
    }

    /// Smallest and largest field value currently held.
    pub fn field_range(&self) -> Option<(f64, f64)> {
        let mut values = self.readings.iter().map(|r| r.field);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::DVec2;

    fn reading(frame: u32, field: f64) -> ProbeReading {
        ProbeReading {
            frame,
            position: DVec2::ZERO,
            field,
            inside_sphere: true,
        }
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut trace = ProbeTrace::new(3);
        for frame in 0..5 {
            trace.push(reading(frame, frame as f64));
        }
        assert_eq!(trace.len(), 3);
        let frames: Vec<u32> = trace.readings.iter().map(|r| r.frame).collect();
        assert_eq!(frames, vec![2, 3, 4]);
    }

    #[test]
    fn test_field_range() {
        let mut trace = ProbeTrace::new(10);
        assert_eq!(trace.field_range(), None);
        trace.push(reading(0, 5.0));
        trace.push(reading(1, 2.0));
        trace.push(reading(2, 9.0));
        assert_eq!(trace.field_range(), Some((2.0, 9.0)));
    }

    #[test]
    fn test_clear_and_zero_capacity() {
        let mut trace = ProbeTrace::new(2);
        trace.push(reading(0, 1.0));
        trace.clear();
        assert!(trace.is_empty());

        let mut disabled = ProbeTrace::new(0);
        disabled.push(reading(0, 1.0));
        assert!(disabled.is_empty());
    }
}
