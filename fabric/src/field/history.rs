use std::collections::VecDeque;

use cgmath::{Point3, Vector3};

use crate::sim::Body;

/// One recorded instant of a body's motion.
#[derive(Debug, Clone, Copy)]
pub struct HistorySample {
    pub t: f32,
    pub pos: Point3<f32>,
    pub vel: Vector3<f32>,
}

/// Per-body bounded FIFO of recent motion samples, index-aligned with the
/// world's body arena. Oldest sample is evicted once a sequence exceeds
/// capacity.
#[derive(Debug)]
pub struct HistoryBuffer {
    buffers: Vec<VecDeque<HistorySample>>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(num_bodies: usize, capacity: usize) -> Self {
        assert!(capacity >= 1, "history capacity must be at least 1");
        Self {
            buffers: (0..num_bodies).map(|_| VecDeque::new()).collect(),
            capacity,
        }
    }

    pub fn num_bodies(&self) -> usize {
        self.buffers.len()
    }

    /// Register storage for a newly spawned body at the end of the arena.
    pub fn push_body(&mut self) {
        self.buffers.push(VecDeque::new());
    }

    /// Append one sample per body. Called once per frame, after integration,
    /// with a non-decreasing timestamp.
    pub fn record(&mut self, now: f32, bodies: &[Body]) {
        debug_assert_eq!(bodies.len(), self.buffers.len());
        for (buf, body) in self.buffers.iter_mut().zip(bodies) {
            Self::push_bounded(buf, self.capacity, now, body);
        }
    }

    /// Append a sample for a single body, used to seed history at spawn time.
    pub fn record_one(&mut self, index: usize, now: f32, body: &Body) {
        let capacity = self.capacity;
        Self::push_bounded(&mut self.buffers[index], capacity, now, body);
    }

    fn push_bounded(buf: &mut VecDeque<HistorySample>, capacity: usize, now: f32, body: &Body) {
        debug_assert!(
            buf.back().is_none_or(|s| s.t <= now),
            "history timestamps must be non-decreasing"
        );
        buf.push_back(HistorySample {
            t: now,
            pos: body.pos,
            vel: body.vel,
        });
        if buf.len() > capacity {
            buf.pop_front();
        }
    }

    pub fn samples(&self, index: usize) -> &VecDeque<HistorySample> {
        &self.buffers[index]
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Vector3, Zero};

    use super::HistoryBuffer;
    use crate::sim::Body;

    fn body_at(x: f32) -> Body {
        Body::new(Point3::new(x, 0.0, 0.0), Vector3::zero(), 20.0)
    }

    #[test]
    fn capacity_evicts_oldest_in_order() {
        let mut history = HistoryBuffer::new(1, 5);
        for t in 0..6 {
            history.record(t as f32, &[body_at(t as f32)]);
        }

        let buf = history.samples(0);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.front().unwrap().t, 1.0, "oldest sample should be gone");
        assert_eq!(buf.back().unwrap().t, 5.0);
        assert!(
            buf.iter().zip(buf.iter().skip(1)).all(|(a, b)| a.t < b.t),
            "samples must stay in increasing time order"
        );
    }

    #[test]
    fn spawned_body_gets_its_own_sequence() {
        let mut history = HistoryBuffer::new(1, 5);
        history.record(0.0, &[body_at(0.0)]);
        history.push_body();
        history.record_one(1, 0.0, &body_at(3.0));

        assert_eq!(history.num_bodies(), 2);
        assert_eq!(history.samples(1).len(), 1);
        assert_eq!(history.samples(1).back().unwrap().pos.x, 3.0);
    }
}
