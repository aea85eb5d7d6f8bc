//! Terminal output helpers shared by the command-line front end

use anyhow::Context;
use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Adapter that lets the minus pager be written to like any `Write`
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// writeln!(writer, "Some long output...")?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn stdout_is_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Paging is used for interactive terminals unless `NO_PAGER` is set
pub fn should_page() -> bool {
    stdout_is_terminal() && std::env::var_os("NO_PAGER").is_none()
}

/// Show `text` through the pager when [`should_page`], print it otherwise
pub fn page_or_print(text: &str) -> anyhow::Result<()> {
    if !should_page() {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        return Ok(stdout.flush()?);
    }

    let pager = Pager::new();
    let mut writer = PagerWriter::new(pager.clone());
    writer.write_all(text.as_bytes())?;
    minus::page_all(writer.pager().clone()).context("Unable to run the pager")
}
