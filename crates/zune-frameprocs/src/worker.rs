/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Row partitioning across threads
//!
//! A [`Worker`] splits the rows of a target buffer into contiguous blocks
//! and runs a function on each block from a scoped thread. Every block owns
//! its target rows exclusively, the function borrows everything else
//! immutably. The call returns once every block is done.
//!
//! Without the `threads` feature every call runs on the calling thread.
use zune_frame_core::log::trace;

/// Describes how many threads a single call may use
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Worker {
    threads:      usize,
    minimal_rows: usize
}

impl Default for Worker {
    fn default() -> Self {
        Worker::new(0)
    }
}

impl Worker {
    /// Create a worker using `threads` threads
    ///
    /// Zero picks the available parallelism of the machine
    pub fn new(threads: usize) -> Worker {
        let threads = if threads == 0 {
            std::thread::available_parallelism()
                .map(|x| x.get())
                .unwrap_or(1)
        } else {
            threads
        };
        Worker {
            threads,
            minimal_rows: 16
        }
    }

    /// A worker which runs everything on the calling thread
    pub const fn single_threaded() -> Worker {
        Worker {
            threads:      1,
            minimal_rows: 16
        }
    }

    /// Set the minimum number of rows a thread is handed.
    ///
    /// Calls with fewer rows than twice this value run on one thread.
    /// Zero is treated as one.
    pub fn set_minimal_rows(mut self, rows: usize) -> Self {
        self.minimal_rows = rows.max(1);
        self
    }

    pub const fn threads(&self) -> usize {
        self.threads
    }

    pub const fn minimal_rows(&self) -> usize {
        self.minimal_rows
    }

    /// Number of blocks `rows` rows get split into
    pub fn blocks_for(&self, rows: usize) -> usize {
        if cfg!(feature = "threads") {
            (rows / self.minimal_rows).clamp(1, self.threads.max(1))
        } else {
            1
        }
    }

    /// Run `function` over `rows` rows of `target`.
    ///
    /// `function` receives the block of `target` starting at the first
    /// element of row `first_row`, `first_row`, and the number of rows in the
    /// block. The last block may be shorter than `rows * stride_elements` if
    /// `target` omits the padding of its final row.
    ///
    /// # Arguments
    /// - target: Buffer to split, row `y` starts at `y * stride_elements`
    /// - stride_elements: Distance between two row starts
    /// - rows: Number of rows to process
    /// - function: `(block, first_row, rows_in_block)`
    pub fn execute_function<T, F>(
        &self, target: &mut [T], stride_elements: usize, rows: usize, function: F
    ) where
        T: Send,
        F: Fn(&mut [T], usize, usize) + Sync
    {
        let blocks = self.blocks_for(rows);

        if blocks <= 1 {
            function(target, 0, rows);
            return;
        }
        #[cfg(feature = "threads")]
        {
            let rows_per_block = rows.div_ceil(blocks);

            trace!(
                "Splitting {} rows into blocks of {} rows",
                rows,
                rows_per_block
            );

            std::thread::scope(|s| {
                let function = &function;
                let mut remaining = target;
                let mut first_row = 0;

                while first_row < rows {
                    let block_rows = rows_per_block.min(rows - first_row);
                    let split = (block_rows * stride_elements).min(remaining.len());
                    let (block, rest) = std::mem::take(&mut remaining).split_at_mut(split);
                    remaining = rest;

                    let start = first_row;
                    s.spawn(move || function(block, start, block_rows));

                    first_row += block_rows;
                }
            });
        }
        #[cfg(not(feature = "threads"))]
        {
            trace!("Threads disabled, running {} rows on the caller", rows);
            function(target, 0, rows);
        }
    }
}

/// Run `function` over the rows of `target` on `worker`, or on the
/// calling thread if there is no worker
pub(crate) fn execute_rows<T, F>(
    worker: Option<&Worker>, target: &mut [T], stride_elements: usize, rows: usize, function: F
) where
    T: Send,
    F: Fn(&mut [T], usize, usize) + Sync
{
    match worker {
        Some(worker) => worker.execute_function(target, stride_elements, rows, function),
        None => function(target, 0, rows)
    }
}
