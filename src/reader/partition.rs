// Copyright 2025 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded fan-out over `[0, n)` with a synchronous join.

use std::ops::Range;

/// Split `[0, n)` into at most `max_parts` contiguous, disjoint, gap-free
/// sub-ranges. Never produces more parts than elements, so every part is
/// non-empty; sizes differ by at most one.
pub fn split(n: usize, max_parts: usize) -> Vec<Range<usize>> {
    if n == 0 {
        return Vec::new();
    }
    let parts = max_parts.max(1).min(n);
    let base = n / parts;
    let extra = n % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let len = base + usize::from(i < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Invoke `f(start, end, worker)` once per sub-range of `[0, n)`, in
/// parallel on the rayon pool, and return only after every invocation has
/// finished. Callers may read state written by all workers as soon as this
/// returns.
pub fn parallel_for<F>(n: usize, max_threads: usize, f: F)
where
    F: Fn(usize, usize, usize) + Sync,
{
    let parts = split(n, max_threads);
    if parts.len() <= 1 {
        if let Some(part) = parts.first() {
            f(part.start, part.end, 0);
        }
        return;
    }
    let f = &f;
    rayon::scope(|scope| {
        for (worker, part) in parts.into_iter().enumerate() {
            scope.spawn(move |_| f(part.start, part.end, worker));
        }
    });
}

/// Fill `out` with `f(i)` for every index, fanning out across at most
/// `max_threads` workers. Each worker owns a disjoint `&mut` sub-slice, so
/// no element is written twice and no locking is involved.
pub fn parallel_fill<T, F>(out: &mut [T], max_threads: usize, f: F)
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    let parts = split(out.len(), max_threads);
    if parts.len() <= 1 {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = f(i);
        }
        return;
    }
    let f = &f;
    rayon::scope(|scope| {
        let mut rest = out;
        for part in parts {
            let start = part.start;
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(part.len());
            rest = tail;
            scope.spawn(move |_| {
                for (offset, slot) in chunk.iter_mut().enumerate() {
                    *slot = f(start + offset);
                }
            });
        }
    });
}

#[cfg(test)]
#[path = "partition_test.rs"]
mod partition_test;
