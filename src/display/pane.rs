use crate::error::{CoreError, Result};

/// Companion pane shown beside the editor area.
///
/// Each `set-pane` adds one entry; entries split the pane height evenly. The
/// content is HTML from the editor core and is only ever displayed, never run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidePane {
    entries: Vec<String>,
}

impl SidePane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_html(&mut self, bytes: &[u8]) -> Result<()> {
        let html = std::str::from_utf8(bytes)
            .map_err(|e| CoreError::malformed("set-pane", format!("pane html is not utf-8: {}", e)))?;
        self.entries.push(html.to_string());
        Ok(())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows given to each entry when the pane is `height` rows tall.
    pub fn entry_rows(&self, height: u16) -> Vec<u16> {
        let n = self.entries.len();
        if n == 0 {
            return Vec::new();
        }
        let base = height / n as u16;
        let extra = (height % n as u16) as usize;
        (0..n)
            .map(|i| base + u16::from(i < extra))
            .collect()
    }

    /// Text shown for an entry: tags dropped, common entities decoded,
    /// whitespace runs collapsed.
    pub fn plain_text(html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut in_tag = false;
        for ch in html.chars() {
            match ch {
                '<' => {
                    in_tag = true;
                    out.push(' ');
                }
                '>' if in_tag => in_tag = false,
                _ if in_tag => {}
                c => out.push(c),
            }
        }
        let decoded = out
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&");
        decoded.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/pane.rs"]
mod tests;
