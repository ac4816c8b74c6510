use std::io::{self, Write};

use crate::{engine::Translation, stats::Statistics};

/// Writes `logical,physical,value` rows followed by the two rate lines.
pub fn write_report<W: Write>(
    mut out: W,
    translations: &[Translation],
    stats: &Statistics,
) -> io::Result<()> {
    for translation in translations {
        writeln!(
            out,
            "{},{},{}",
            translation.address.raw(),
            translation.physical.0,
            translation.value
        )?;
    }
    writeln!(out, "Page Faults Rate, {:.2}%,", stats.fault_rate())?;
    write!(out, "TLB Hits Rate, {:.2}%,", stats.tlb_hit_rate())?;
    out.flush()
}
