//! Buffer-level rescaling: run the scalar kernel over every element of an accumulator
//! buffer, serially or across the rayon pool. Results are bit-identical to per-element
//! [`Rescaler::apply`].

use crate::error::{RescaleError, Result};
use crate::rescale::Rescaler;
use rayon::prelude::*;

/// Minimum elements per rayon task; smaller buffers aren't worth splitting.
const PAR_CHUNK: usize = 4096;

/// Per-output-channel quantization parameters. Channel `c` applies to every element whose
/// index is congruent to `c` modulo the channel count (row-major, channels innermost).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelParams {
    pub multipliers: Vec<i32>,
    pub shifts: Vec<i32>,
}

impl ChannelParams {
    pub fn new(multipliers: Vec<i32>, shifts: Vec<i32>) -> Result<Self> {
        if shifts.len() != multipliers.len() {
            return Err(RescaleError::LengthMismatch { what: "shifts", got: shifts.len(), expected: multipliers.len() });
        }
        Ok(Self { multipliers, shifts })
    }

    pub fn channels(&self) -> usize { self.multipliers.len() }

    fn check(&self, len: usize) -> Result<()> {
        let c = self.channels();
        if c == 0 || len % c != 0 {
            return Err(RescaleError::LengthMismatch { what: "accumulators", got: len, expected: len.next_multiple_of(c.max(1)) });
        }
        Ok(())
    }
}

pub fn rescale_into(r: &Rescaler, acc: &[i32], multiplier: i32, shift: i32, out: &mut [i32]) -> Result<()> {
    if out.len() != acc.len() {
        return Err(RescaleError::LengthMismatch { what: "output", got: out.len(), expected: acc.len() });
    }
    for (o, &x) in out.iter_mut().zip(acc) { *o = r.apply(x, multiplier, shift); }
    Ok(())
}

pub fn rescale(r: &Rescaler, acc: &[i32], multiplier: i32, shift: i32) -> Vec<i32> {
    acc.iter().map(|&x| r.apply(x, multiplier, shift)).collect()
}

pub fn par_rescale(r: &Rescaler, acc: &[i32], multiplier: i32, shift: i32) -> Vec<i32> {
    acc.par_iter().with_min_len(PAR_CHUNK).map(|&x| r.apply(x, multiplier, shift)).collect()
}

pub fn rescale_per_channel(r: &Rescaler, acc: &[i32], params: &ChannelParams) -> Result<Vec<i32>> {
    params.check(acc.len())?;
    let mut out = Vec::with_capacity(acc.len());
    for row in acc.chunks_exact(params.channels()) {
        out.extend(row.iter().enumerate().map(|(c, &x)| r.apply(x, params.multipliers[c], params.shifts[c])));
    }
    Ok(out)
}

pub fn par_rescale_per_channel(r: &Rescaler, acc: &[i32], params: &ChannelParams) -> Result<Vec<i32>> {
    params.check(acc.len())?;
    let c = params.channels();
    let rows_per_task = (PAR_CHUNK / c).max(1);
    let mut out = vec![0i32; acc.len()];
    out.par_chunks_mut(rows_per_task * c)
        .zip(acc.par_chunks(rows_per_task * c))
        .for_each(|(dst, src)| {
            for (d, (i, &x)) in dst.iter_mut().zip(src.iter().enumerate()) {
                let ch = i % c;
                *d = r.apply(x, params.multipliers[ch], params.shifts[ch]);
            }
        });
    Ok(out)
}
