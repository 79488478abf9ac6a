use std::io::{BufRead, Write};

use log::{debug, warn};

use crate::backing::PageSource;
use crate::dirty::DirtyClass;
use crate::error::{PagerError, Result};
use crate::translator::{ParsePolicy, Statistics, Translator};

/// One input record: a logical address and an optional modification tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRecord {
    pub addr: u32,
    pub tag: Option<DirtyClass>,
}

/// Parse one line of the address stream: `"<address>"` or
/// `"<address> <tag>"` with tag `R` (clean) or `W` (modified). Non-positive
/// addresses are rejected like unparsable ones; the caller's parse policy
/// decides what happens next.
pub fn parse_record(line: &str, line_no: usize) -> Result<AddressRecord> {
    let bad = || PagerError::ParseRecord {
        line: line_no,
        text: line.to_string(),
    };

    let mut tokens = line.split_whitespace();
    let addr: i64 = tokens
        .next()
        .ok_or_else(bad)?
        .parse()
        .map_err(|_| bad())?;
    if addr <= 0 || addr > u32::MAX as i64 {
        return Err(bad());
    }

    let tag = match tokens.next() {
        None => None,
        Some("R") => Some(DirtyClass::Clean),
        Some("W") => Some(DirtyClass::Write),
        Some(_) => return Err(bad()),
    };
    if tokens.next().is_some() {
        return Err(bad());
    }

    Ok(AddressRecord {
        addr: addr as u32,
        tag,
    })
}

/// Drive a whole address stream through the translator, writing one result
/// line per translated address. Bad records are skipped or end the stream
/// according to the configured policy; translation and I/O errors abort.
pub fn process_stream<S, R, W>(tr: &mut Translator<S>, input: R, out: &mut W) -> Result<()>
where
    S: PageSource,
    R: BufRead,
    W: Write,
{
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let record = match parse_record(&line, idx + 1) {
            Ok(record) => record,
            Err(e) => match tr.config().parse_policy {
                ParsePolicy::Skip => {
                    warn!("{e}, skipping");
                    continue;
                }
                ParsePolicy::Terminate => {
                    debug!("{e}, ending stream");
                    break;
                }
            },
        };

        let t = tr.translate(record.addr, record.tag)?;
        writeln!(
            out,
            "Virtual address: {} Physical address: {} Value: {}",
            t.virtual_addr, t.physical_addr, t.value
        )?;
    }

    Ok(())
}

/// Write the end-of-run summary: fault and TLB hit rates, and the
/// write-back count when dirty tracking is on.
pub fn write_summary<W: Write>(
    stats: &Statistics,
    track_dirty_bit: bool,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Page Fault Rate : {}", stats.fault_rate())?;
    writeln!(out, "TLB Hit Rate : {}", stats.tlb_hit_rate())?;
    if track_dirty_bit {
        writeln!(
            out,
            "Mod bit Count for pages with mod bit 'W' = {}",
            stats.write_backs
        )?;
    }
    Ok(())
}
