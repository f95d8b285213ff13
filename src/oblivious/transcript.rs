//! Engine wrapper that records the sequence of primitives invoked.
//!
//! Only the kind of each operation is recorded (plus the public bit count of a decomposition), never an operand.
//! An algorithm is oblivious iff its transcript depends on public parameters alone,
//! so comparing transcripts of runs over different secrets is a direct test of that property.

use super::ObliviousOps;

/// One recorded primitive call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// [ObliviousOps::constant]
    Constant,
    /// [ObliviousOps::add]
    Add,
    /// [ObliviousOps::sub]
    Sub,
    /// [ObliviousOps::mul]
    Mul,
    /// [ObliviousOps::cmp_ge]
    CmpGe,
    /// [ObliviousOps::and]
    And,
    /// [ObliviousOps::not]
    Not,
    /// [ObliviousOps::select]
    Select,
    /// [ObliviousOps::bit_decompose] with the requested number of bits.
    BitDecompose(u32),
    /// [ObliviousOps::cond_swap]
    CondSwap,
}

/// Wraps an engine `E` and logs every call into a transcript.
#[derive(Clone, Debug, Default)]
pub struct TranscriptEngine<E: ObliviousOps> {
    inner: E,
    transcript: Vec<Op>,
}

impl<E: ObliviousOps> TranscriptEngine<E> {
    /// Wrap `inner` with an empty transcript.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            transcript: Vec::new(),
        }
    }

    /// Operations recorded so far.
    pub fn transcript(&self) -> &[Op] {
        &self.transcript
    }

    /// Take the transcript, leaving an empty one behind.
    pub fn take_transcript(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.transcript)
    }

    /// Unwrap the inner engine.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: ObliviousOps> ObliviousOps for TranscriptEngine<E> {
    type Value = E::Value;
    type Bit = E::Bit;

    fn value_bits(&self) -> u32 {
        self.inner.value_bits()
    }

    fn constant(&mut self, x: u64) -> Self::Value {
        self.transcript.push(Op::Constant);
        self.inner.constant(x)
    }

    fn add(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Value {
        self.transcript.push(Op::Add);
        self.inner.add(a, b)
    }

    fn sub(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Value {
        self.transcript.push(Op::Sub);
        self.inner.sub(a, b)
    }

    fn mul(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Value {
        self.transcript.push(Op::Mul);
        self.inner.mul(a, b)
    }

    fn cmp_ge(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Bit {
        self.transcript.push(Op::CmpGe);
        self.inner.cmp_ge(a, b)
    }

    fn and(&mut self, a: &Self::Bit, b: &Self::Bit) -> Self::Bit {
        self.transcript.push(Op::And);
        self.inner.and(a, b)
    }

    fn not(&mut self, a: &Self::Bit) -> Self::Bit {
        self.transcript.push(Op::Not);
        self.inner.not(a)
    }

    fn select(&mut self, cond: &Self::Bit, a: &Self::Value, b: &Self::Value) -> Self::Value {
        self.transcript.push(Op::Select);
        self.inner.select(cond, a, b)
    }

    fn bit_decompose(&mut self, a: &Self::Value, nbits: u32) -> Vec<Self::Bit> {
        self.transcript.push(Op::BitDecompose(nbits));
        self.inner.bit_decompose(a, nbits)
    }

    fn cond_swap(&mut self, cond: &Self::Bit, a: &mut Self::Value, b: &mut Self::Value) {
        self.transcript.push(Op::CondSwap);
        self.inner.cond_swap(cond, a, b)
    }
}
