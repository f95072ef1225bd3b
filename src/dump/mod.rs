use std::fmt::{self, Write as _};
use std::io::{self, Write};

use log::debug;

/// Number of bytes rendered on a single dump line.
pub const ROW_LEN: usize = 16;

// a ` :` is printed right before this column
const SEPARATOR_COLUMN: usize = 8;

const ELISION_MARKER: &str = "          .. .. .. .. .. .. .. .. : .. .. .. .. .. .. .. ..";

/// A slice of at most [`ROW_LEN`] bytes together with the cumulative offset
/// at which it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    bytes: &'a [u8],
    end: usize,
}

impl<'a> Row<'a> {
    // rows are only built by HexDump::rows(), which keeps bytes.len() <= end
    pub(crate) fn new(bytes: &'a [u8], end: usize) -> Self {
        debug_assert!(bytes.len() <= ROW_LEN);
        debug_assert!(bytes.len() <= end);
        Self { bytes, end }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Offset of the first byte of this row.
    pub fn start(&self) -> usize {
        self.end - self.bytes.len()
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_full(&self) -> bool {
        self.bytes.len() == ROW_LEN
    }
}

impl fmt::Display for Row<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{:08X}:", self.start())?;
        if self.bytes.is_empty() {
            return Ok(());
        }
        for column in 0..ROW_LEN {
            if column == SEPARATOR_COLUMN {
                fmt.write_str(" :")?;
            }
            match self.bytes.get(column) {
                Some(byte) => write!(fmt, " {:02X}", byte)?,
                None => fmt.write_str("   ")?,
            }
        }
        fmt.write_str("  ")?;
        for byte in self.bytes {
            fmt.write_char(printable(*byte))?;
        }
        Ok(())
    }
}

// printable ASCII is 0x20..=0x7E, everything else is shown as a dot
fn printable(byte: u8) -> char {
    if (0x20..=0x7E).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RunState {
    #[default]
    Normal,
    Eliding,
}

enum Line<'a> {
    Row(Row<'a>),
    Elision,
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Line::Row(row) => fmt::Display::fmt(row, fmt),
            Line::Elision => fmt.write_str(ELISION_MARKER),
        }
    }
}

/// Per-call state: the previous full row and whether its run was already elided.
#[derive(Default)]
struct DumpState<'a> {
    previous: Option<&'a [u8]>,
    run: RunState,
}

impl<'a> DumpState<'a> {
    // only called for full rows that are not the last one
    fn advance(&mut self, row: Row<'a>) -> Option<Line<'a>> {
        debug_assert!(row.is_full());
        let repeated = self.previous == Some(row.bytes());
        self.previous = Some(row.bytes());
        match (repeated, self.run) {
            (true, RunState::Eliding) => None,
            (true, RunState::Normal) => {
                self.run = RunState::Eliding;
                Some(Line::Elision)
            }
            (false, _) => {
                self.run = RunState::Normal;
                Some(Line::Row(row))
            }
        }
    }
}

/// Hex+ASCII rendering of a byte buffer.
///
/// Every line starts with the offset of its first byte. Runs of identical
/// 16-byte rows are collapsed into a single `.. ..` marker line, except for
/// the last row which is always printed. A non-empty buffer is closed by a
/// line carrying only its total length, e.g.
///
/// ```text
/// 00000000: 68 65 6C 6C 6F 20 68 65 : 6C 6C 6F                 hello hello
/// 0000000B:
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HexDump<'a> {
    buffer: &'a [u8],
}

impl<'a> HexDump<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'a>> + 'a {
        self.buffer.chunks(ROW_LEN).scan(0usize, |end, chunk| {
            *end += chunk.len();
            Some(Row::new(chunk, *end))
        })
    }
}

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        if self.buffer.is_empty() {
            return writeln!(fmt, "{}", Row::new(&[], 0));
        }
        let mut state = DumpState::default();
        let mut rows = self.rows().peekable();
        while let Some(row) = rows.next() {
            if rows.peek().is_none() {
                writeln!(fmt, "{}", row)?;
            } else if let Some(line) = state.advance(row) {
                writeln!(fmt, "{}", line)?;
            }
        }
        writeln!(fmt, "{:08X}:", self.buffer.len())
    }
}

pub fn write_dump<W: Write>(out: &mut W, buffer: &[u8]) -> io::Result<()> {
    write!(out, "{}", HexDump::new(buffer))
}

pub fn dump_to_string(buffer: &[u8]) -> String {
    HexDump::new(buffer).to_string()
}

/// Dumps `buffer` on stdout. The stdout lock is held for the whole dump,
/// so dumps from different threads never interleave.
pub fn amqp_dump(buffer: &[u8]) -> io::Result<()> {
    debug!(target: "app", "amqp_dump - dumping {} bytes", buffer.len());
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_dump(&mut handle, buffer)?;
    handle.flush()
}
