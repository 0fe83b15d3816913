//! Arrow and Parquet interop for binning results.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, DictionaryArray, Float64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema, UInt32Type};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use log::debug;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::binner::{Binner, Bins};
use crate::error::{BinsError, Result};

/// Bin an Arrow column. Null entries stay unlabeled.
pub fn bin_array(binner: &Binner, array: &Float64Array) -> Bins {
    binner.assign_iter(array.iter())
}

fn label_to_key(label: usize) -> Result<u32> {
    u32::try_from(label)
        .map_err(|_| BinsError::InvalidArgument(format!("bin label {} does not fit in u32", label)))
}

impl Bins {
    /// Arrow form of the categorical result: keys are the labels, the
    /// dictionary holds one interval string per category.
    pub fn to_dictionary_array(&self) -> Result<DictionaryArray<UInt32Type>> {
        let keys = self
            .labels()
            .iter()
            .map(|l| l.map(label_to_key).transpose())
            .collect::<Result<UInt32Array>>()?;
        let names: Vec<String> = self.categories().iter().map(|c| c.to_string()).collect();
        let values = Arc::new(StringArray::from(names)) as ArrayRef;
        Ok(DictionaryArray::try_new(keys, values)?)
    }
}

/// Write values next to their labels and intervals as Parquet.
///
/// Columns are `value`, `bin` and `interval`; rows are written in record
/// batches of `chunk_size`.
pub fn write_parquet(
    path: impl AsRef<Path>,
    values: &[f64],
    bins: &Bins,
    chunk_size: usize,
) -> Result<()> {
    if values.len() != bins.len() {
        return Err(BinsError::InvalidArgument(format!(
            "{} values but {} labels",
            values.len(),
            bins.len()
        )));
    }
    if chunk_size == 0 {
        return Err(BinsError::InvalidArgument("chunk size must be positive".into()));
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("value", DataType::Float64, false),
        Field::new("bin", DataType::UInt32, true),
        Field::new("interval", DataType::Utf8, true),
    ]));

    let file = File::create(path.as_ref())?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    let mut batches = 0;
    for chunk in &values.iter().zip(bins.labels()).chunks(chunk_size) {
        let rows: Vec<(f64, Option<usize>)> = chunk.map(|(v, l)| (*v, *l)).collect();

        let value_col = Float64Array::from_iter_values(rows.iter().map(|(v, _)| *v));
        let bin_col = rows
            .iter()
            .map(|(_, l)| l.map(label_to_key).transpose())
            .collect::<Result<UInt32Array>>()?;
        let interval_col: StringArray = rows
            .iter()
            .map(|(_, l)| l.map(|l| bins.categories()[l].to_string()))
            .collect();

        let arrays: Vec<ArrayRef> = vec![
            Arc::new(value_col),
            Arc::new(bin_col),
            Arc::new(interval_col),
        ];
        let batch = RecordBatch::try_new(schema.clone(), arrays)?;
        writer.write(&batch)?;
        batches += 1;
    }
    writer.close()?;
    debug!(
        "wrote {} rows in {} batches to {}",
        values.len(),
        batches,
        path.as_ref().display()
    );
    Ok(())
}
