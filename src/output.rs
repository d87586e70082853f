//! Serialisation of counted cycles.
use serde::Serialize;
use std::io::Write;

use crate::histogram::RangeHistogram;
use crate::rainflow::Cycle;

/// Everything a counting run produces.
#[derive(Debug, Serialize)]
pub struct CycleReport<T> {
    /// Number of reversals the signal reduced to, closing value included.
    pub peaks: usize,
    pub cycles: Vec<Cycle<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<RangeHistogram>,
}

impl<T: Serialize> CycleReport<T> {
    /// Writes the report as pretty-printed JSON and flushes `writer`.
    pub fn write_json<W: Write>(&self, mut writer: W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes one `range,mean` row per cycle. The histogram is not part of the CSV output.
    pub fn write_csv<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for cycle in &self.cycles {
            wtr.serialize(cycle)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
