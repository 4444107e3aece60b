//! Interactive chooser over a JSON listing of remote files.
//!
//! The listing is a JSON array of chooser results
//! (`[{"link": "...", "name": "...", "size": 123}, ...]`). Entries are printed
//! numbered and the user types one number; blank input, `q` or EOF cancels.

use anyhow::{Context, Result};
use dropfetch_core::chooser::{Chooser, ChooserRequest};
use dropfetch_core::ChooserResult;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Mutex;

type Input = Box<dyn BufRead + Send>;
type Output = Box<dyn Write + Send>;

pub struct ListingChooser {
    entries: Vec<ChooserResult>,
    io: Mutex<(Input, Output)>,
}

impl ListingChooser {
    /// Load the listing at `path` and prompt on stdin/stdout.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read listing {}", path.display()))?;
        let entries: Vec<ChooserResult> = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse listing {}", path.display()))?;
        Ok(Self::with_io(
            entries,
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stdout()),
        ))
    }

    pub fn with_io(entries: Vec<ChooserResult>, input: Input, output: Output) -> Self {
        Self {
            entries,
            io: Mutex::new((input, output)),
        }
    }
}

impl Chooser for ListingChooser {
    fn choose(&self, _request: &ChooserRequest) -> Result<Vec<ChooserResult>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        let mut guard = self
            .io
            .lock()
            .map_err(|_| anyhow::anyhow!("chooser terminal lock poisoned"))?;
        let (input, output) = &mut *guard;

        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(output, "{:>3}) {}", i + 1, describe(entry))?;
        }
        loop {
            write!(output, "Select a file [1-{}, blank to cancel]: ", self.entries.len())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(Vec::new());
            }
            match parse_choice(&line, self.entries.len()) {
                Choice::Cancel => return Ok(Vec::new()),
                Choice::Pick(index) => return Ok(vec![self.entries[index].clone()]),
                Choice::Invalid => writeln!(output, "not a valid choice: {}", line.trim())?,
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Cancel,
    /// Zero-based index.
    Pick(usize),
    Invalid,
}

fn parse_choice(line: &str, count: usize) -> Choice {
    let line = line.trim();
    if line.is_empty() || line.eq_ignore_ascii_case("q") {
        return Choice::Cancel;
    }
    match line.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Pick(n - 1),
        _ => Choice::Invalid,
    }
}

fn describe(entry: &ChooserResult) -> String {
    let name = entry.name.as_deref().unwrap_or("<unnamed>");
    match entry.size {
        Some(size) => format!("{} ({:.1} MB)", name, size as f64 / 1_000_000.0),
        None => format!("{} (size unknown)", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Output sink the test can read back after the chooser is done.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn entry(name: &str, size: Option<u64>) -> ChooserResult {
        ChooserResult {
            name: Some(name.to_string()),
            size,
            ..Default::default()
        }
    }

    fn chooser(input: &str, entries: Vec<ChooserResult>) -> (ListingChooser, Captured) {
        let out = Captured::default();
        let c = ListingChooser::with_io(
            entries,
            Box::new(io::Cursor::new(input.as_bytes().to_vec())),
            Box::new(out.clone()),
        );
        (c, out)
    }

    #[test]
    fn parse_choice_variants() {
        assert_eq!(parse_choice("2\n", 3), Choice::Pick(1));
        assert_eq!(parse_choice("  \n", 3), Choice::Cancel);
        assert_eq!(parse_choice("Q", 3), Choice::Cancel);
        assert_eq!(parse_choice("0", 3), Choice::Invalid);
        assert_eq!(parse_choice("4", 3), Choice::Invalid);
        assert_eq!(parse_choice("abc", 3), Choice::Invalid);
    }

    #[test]
    fn picks_entry_after_invalid_input() {
        let (c, out) = chooser(
            "9\n2\n",
            vec![entry("a.png", Some(1_500_000)), entry("b.pdf", None)],
        );
        let picked = c.choose(&ChooserRequest::single_direct()).unwrap();
        assert_eq!(picked, vec![entry("b.pdf", None)]);

        let printed = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        assert!(printed.contains("1) a.png (1.5 MB)"));
        assert!(printed.contains("2) b.pdf (size unknown)"));
        assert!(printed.contains("not a valid choice: 9"));
    }

    #[test]
    fn eof_and_blank_cancel() {
        let (c, _) = chooser("", vec![entry("a.png", None)]);
        assert!(c.choose(&ChooserRequest::single_direct()).unwrap().is_empty());
        let (c, _) = chooser("\n", vec![entry("a.png", None)]);
        assert!(c.choose(&ChooserRequest::single_direct()).unwrap().is_empty());
    }

    #[test]
    fn empty_listing_cancels_without_prompt() {
        let (c, out) = chooser("1\n", vec![]);
        assert!(c.choose(&ChooserRequest::single_direct()).unwrap().is_empty());
        assert!(out.0.lock().unwrap().is_empty());
    }

    #[test]
    fn from_file_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.json");
        std::fs::write(
            &path,
            r#"[{"link": "https://dl.example.com/x/photo.png",
                 "name": "photo.png",
                 "size": 5000000}]"#,
        )
        .unwrap();
        let c = ListingChooser::from_file(&path).unwrap();
        assert_eq!(c.entries.len(), 1);
        assert_eq!(c.entries[0].size, Some(5_000_000));
    }

    #[test]
    fn from_file_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(ListingChooser::from_file(&path).is_err());
    }
}
