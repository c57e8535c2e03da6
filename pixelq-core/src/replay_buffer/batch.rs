//! Column storage and transition batches.

/// Column storage for fixed-shape samples.
///
/// A `BatchBase` value serves two roles: preallocated slot storage inside the
/// replay buffer, and the batch handed to the value approximator after
/// sampling.
pub trait BatchBase: Sized {
    /// Creates zeroed storage for `capacity` samples of the given shape.
    fn with_capacity(capacity: usize, shape: &[usize]) -> Self;

    /// Overwrites the sample at slot `ix` with the first sample of `data`.
    fn push(&mut self, ix: usize, data: &Self);

    /// Gathers the samples at `ixs` into a new batch.
    fn sample(&self, ixs: &[usize]) -> Self;
}

/// A batch of float observations in a flat buffer.
///
/// Samples are stored contiguously in row-major order; `shape` is the shape
/// of a single sample and `m` its length in elements.
#[derive(Clone, Debug)]
pub struct ObsBatch {
    /// The number of samples in the batch.
    pub n: usize,

    /// The length of a single sample in elements.
    pub m: usize,

    /// The shape of a single sample.
    pub shape: Vec<usize>,

    /// The flat buffer, of length `n * m`.
    pub buf: Vec<f32>,
}

impl ObsBatch {
    /// Wraps one sample of the given shape.
    pub fn single(shape: &[usize], buf: Vec<f32>) -> Self {
        let m = shape.iter().product();
        debug_assert_eq!(buf.len(), m);
        Self {
            n: 1,
            m,
            shape: shape.to_vec(),
            buf,
        }
    }
}

impl BatchBase for ObsBatch {
    fn with_capacity(capacity: usize, shape: &[usize]) -> Self {
        let m = shape.iter().product::<usize>();
        Self {
            n: capacity,
            m,
            shape: shape.to_vec(),
            buf: vec![0.0; capacity * m],
        }
    }

    #[inline]
    fn push(&mut self, ix: usize, data: &Self) {
        debug_assert_eq!(self.m, data.m);
        let dst = ix * self.m;
        self.buf[dst..dst + self.m].copy_from_slice(&data.buf[..self.m]);
    }

    fn sample(&self, ixs: &[usize]) -> Self {
        let m = self.m;
        let mut buf = vec![0.0; ixs.len() * m];
        for (i, &ix) in ixs.iter().enumerate() {
            buf[i * m..(i + 1) * m].copy_from_slice(&self.buf[ix * m..(ix + 1) * m]);
        }
        Self {
            n: ixs.len(),
            m,
            shape: self.shape.clone(),
            buf,
        }
    }
}

/// A sampled batch of transitions: five parallel columns.
#[derive(Debug)]
pub struct TransitionBatch<O: BatchBase> {
    /// Observations before the transition.
    pub obs: O,

    /// Actions taken.
    pub act: Vec<u8>,

    /// Observations after the transition.
    pub next_obs: O,

    /// Rewards received.
    pub reward: Vec<f32>,

    /// Episode termination flags.
    pub done: Vec<bool>,
}

impl<O: BatchBase> TransitionBatch<O> {
    /// Returns the number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.reward.len()
    }

    /// Returns `true` if the batch holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.reward.is_empty()
    }

    /// Decomposes the batch into (obs, act, next_obs, reward, done).
    pub fn unpack(self) -> (O, Vec<u8>, O, Vec<f32>, Vec<bool>) {
        (self.obs, self.act, self.next_obs, self.reward, self.done)
    }
}
