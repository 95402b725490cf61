use crate::geometry::{Fp, Vec3f};

/// Running per-pixel average of frame estimates. Two equal-size buffers
/// swap read/write roles every frame; the writer never reads the buffer
/// it is writing, so frame N+1 always observes frame N's completed
/// result.
pub struct Accumulator {
    buffers: [Vec<Vec3f>; 2],
    read: usize,
    frame_count: u32,
    frame_cap: u32,
}

impl Accumulator {
    pub fn new(len: usize, frame_cap: u32) -> Accumulator {
        Accumulator {
            buffers: [vec![Vec3f::zeros(); len], vec![Vec3f::zeros(); len]],
            read: 0,
            frame_count: 0,
            frame_cap,
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Past the cap the image freezes; a cost cutoff, not a correctness
    /// condition.
    pub fn converged(&self) -> bool {
        self.frame_count > self.frame_cap
    }

    /// The accumulated average as of the last completed frame.
    pub fn current(&self) -> &[Vec3f] {
        &self.buffers[self.read]
    }

    /// Folds one frame estimate into the running mean with weight
    /// 1 / (frame_count + 1), then swaps the buffer roles.
    pub fn accumulate(&mut self, estimate: &[Vec3f]) {
        assert_eq!(estimate.len(), self.buffers[self.read].len());
        if self.converged() {
            log::debug!("accumulation frozen at {} frames", self.frame_count);
            return;
        }
        let weight = 1.0 / (self.frame_count as Fp + 1.0);
        let (front, back) = self.buffers.split_at_mut(1);
        let (read_buf, write_buf) = if self.read == 0 {
            (&front[0], &mut back[0])
        } else {
            (&back[0], &mut front[0])
        };
        for ((out, old), new) in write_buf.iter_mut().zip(read_buf).zip(estimate) {
            *out = old + (new - old) * weight;
        }
        self.read = 1 - self.read;
        self.frame_count += 1;
    }

    /// Host-triggered restart of the progressive average.
    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(Vec3f::zeros());
        }
        self.frame_count = 0;
        log::debug!("accumulator reset");
    }
}
