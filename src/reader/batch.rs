//! Batch decoding.
//!
//! A batch is decoded with one `RecordDecoder` per work unit. Small batches
//! run on the calling thread; large ones are split into chunks and decoded on
//! the crate-local rayon pool, then stitched back together in record order.
//!
//! Decoding is all-or-nothing. When several records are bad, the reported
//! error is always the one with the lowest record index.

use tracing::debug;

use crate::api::DecodeOptions;
use crate::error::DecodeCsvError;
use crate::schema::ResolvedSchema;

use super::record_decoder::{Column, RecordDecoder};

/// Fully decoded batch: one column per requested output, one row per record.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBatch {
    columns: Vec<Column>,
    num_records: usize,
}

impl DecodedBatch {
    pub fn new(columns: Vec<Column>, num_records: usize) -> Self {
        Self {
            columns,
            num_records,
        }
    }

    /// Number of input records, and length of every column.
    pub fn num_records(&self) -> usize {
        self.num_records
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

/// Decode a batch of records against a resolved schema.
///
/// # Arguments
/// * `records` - Complete UTF-8 records, one per element
/// * `schema` - Schema resolved once for this batch
/// * `options` - Delimiter and parallelism settings
///
/// # Errors
/// `DecodeCsvError::Configuration` for a bad delimiter, otherwise the
/// format or conversion error of the lowest-indexed failing record.
pub fn decode_batch<S>(
    records: &[S],
    schema: &ResolvedSchema,
    options: &DecodeOptions,
) -> Result<DecodedBatch, DecodeCsvError>
where
    S: AsRef<str> + Sync,
{
    let delimiter = options.validate()?;
    debug!(
        records = records.len(),
        columns = schema.num_columns(),
        field_bound = schema.field_bound(),
        "Decoding CSV batch"
    );

    let columns = if records.len() >= options.parallel_threshold {
        decode_parallel(records, schema, delimiter, options.effective_chunk_size())?
    } else {
        decode_chunk(records, 0, schema, delimiter)?
    };

    debug!(records = records.len(), "Decoded CSV batch");
    Ok(DecodedBatch::new(columns, records.len()))
}

/// Decode a contiguous run of records that starts at batch index `first_index`.
fn decode_chunk<S: AsRef<str>>(
    records: &[S],
    first_index: usize,
    schema: &ResolvedSchema,
    delimiter: u8,
) -> Result<Vec<Column>, DecodeCsvError> {
    let mut decoder = RecordDecoder::new(schema, delimiter);
    decoder.reserve_for_batch(records.len());

    for (offset, record) in records.iter().enumerate() {
        decoder.decode_record(record.as_ref()).map_err(|err| {
            let record_index = first_index + offset;
            debug!(record_index, error = %err, "CSV record failed to decode");
            DecodeCsvError::at_record(record_index, err)
        })?;
    }

    Ok(decoder.finish())
}

#[cfg(feature = "parallel")]
fn decode_parallel<S>(
    records: &[S],
    schema: &ResolvedSchema,
    delimiter: u8,
    chunk_size: usize,
) -> Result<Vec<Column>, DecodeCsvError>
where
    S: AsRef<str> + Sync,
{
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let Some(pool) = decode_pool() else {
        debug!("No decode thread pool available, decoding on the current thread");
        return decode_chunk(records, 0, schema, delimiter);
    };

    // Lowest failing record index seen so far by any worker.
    let first_failure = AtomicUsize::new(usize::MAX);

    let results: Vec<Option<Result<Vec<Column>, DecodeCsvError>>> = pool.install(|| {
        records
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                let start = chunk_index * chunk_size;
                if start > first_failure.load(Ordering::Relaxed) {
                    return None;
                }
                let result = decode_chunk(chunk, start, schema, delimiter);
                if let Err(err) = &result {
                    if let Some(index) = err.record_index() {
                        first_failure.fetch_min(index, Ordering::Relaxed);
                    }
                }
                Some(result)
            })
            .collect()
    });

    // Skipped chunks all start after some failing record, whose chunk comes
    // earlier in this list, so the first error found is the lowest-indexed one.
    let mut merged: Option<Vec<Column>> = None;
    for result in results.into_iter().flatten() {
        let columns = result?;
        match merged.as_mut() {
            None => merged = Some(columns),
            Some(acc) => {
                for (target, part) in acc.iter_mut().zip(columns) {
                    target.append(part);
                }
            }
        }
    }

    Ok(merged.unwrap_or_else(|| RecordDecoder::new(schema, delimiter).finish()))
}

/// Worker pool for parallel batches, built on first use.
///
/// Kept local to the crate so a failing global rayon pool cannot panic a
/// decode. `None` means no pool could be started and batches run inline.
#[cfg(feature = "parallel")]
fn decode_pool() -> Option<&'static rayon::ThreadPool> {
    use std::sync::OnceLock;

    static POOL: OnceLock<Option<rayon::ThreadPool>> = OnceLock::new();

    // Thread count follows RAYON_NUM_THREADS, else the number of CPUs.
    let build = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("csvpick-decode-{i}"))
            .build()
    };

    POOL.get_or_init(|| {
        build(0)
            .or_else(|err| {
                debug!(error = %err, "Decode pool failed to start, retrying with one thread");
                build(1)
            })
            .map_err(|err| debug!(error = %err, "No decode pool available"))
            .ok()
    })
    .as_ref()
}

#[cfg(not(feature = "parallel"))]
fn decode_parallel<S>(
    records: &[S],
    schema: &ResolvedSchema,
    delimiter: u8,
    _chunk_size: usize,
) -> Result<Vec<Column>, DecodeCsvError>
where
    S: AsRef<str> + Sync,
{
    decode_chunk(records, 0, schema, delimiter)
}
