//! Tesseract command-line provider
//!
//! Runs `tesseract <image> stdout tsv` and reads word-level rows
//! (level 5) from the TSV report.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use super::OcrProvider;
use crate::error::{VerifyError, VerifyResult};
use crate::types::{OcrSource, WordObservation};

/// Word rows in tesseract's TSV report
const WORD_LEVEL: &str = "5";

#[derive(Debug, Clone)]
pub struct TesseractCliProvider {
    binary: PathBuf,
}

impl TesseractCliProvider {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for TesseractCliProvider {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

#[async_trait]
impl OcrProvider for TesseractCliProvider {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn scan(&self, image: &Path, source: OcrSource) -> VerifyResult<Vec<WordObservation>> {
        let output = Command::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .arg("tsv")
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                VerifyError::provider(
                    self.name(),
                    format!("cannot run {}: {}", self.binary.display(), e),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VerifyError::provider(
                self.name(),
                format!("exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let report = String::from_utf8_lossy(&output.stdout);
        let words = parse_tsv(&report, source).map_err(|e| VerifyError::provider(self.name(), e))?;
        debug!(image = %image.display(), words = words.len(), "Tesseract scan complete");
        Ok(words)
    }
}

struct TsvColumns {
    level: usize,
    left: usize,
    top: usize,
    conf: usize,
    text: usize,
}

impl TsvColumns {
    fn from_header(header: &str) -> VerifyResult<Self> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();
        let find = |name: &str| {
            names
                .iter()
                .position(|n| *n == name)
                .ok_or_else(|| VerifyError::Transcript(format!("TSV header lacks '{}' column", name)))
        };
        Ok(Self {
            level: find("level")?,
            left: find("left")?,
            top: find("top")?,
            conf: find("conf")?,
            text: find("text")?,
        })
    }
}

/// Parse a tesseract TSV report into word observations (report order)
///
/// Rows without text (block, paragraph and line rows, or blank words)
/// are skipped.
pub fn parse_tsv(report: &str, source: OcrSource) -> VerifyResult<Vec<WordObservation>> {
    let mut lines = report.lines();
    let header = lines
        .next()
        .ok_or_else(|| VerifyError::Transcript("empty TSV report".to_string()))?;
    let columns = TsvColumns::from_header(header)?;

    let mut words = Vec::new();
    for (row_num, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let field = |index: usize| fields.get(index).copied().unwrap_or("");

        if field(columns.level) != WORD_LEVEL {
            continue;
        }
        let text = field(columns.text).trim();
        if text.is_empty() {
            continue;
        }

        let number = |index: usize, name: &str| {
            field(index).trim().parse::<f64>().map_err(|_| {
                VerifyError::Transcript(format!(
                    "row {}: invalid {} value '{}'",
                    row_num + 2,
                    name,
                    field(index)
                ))
            })
        };
        let x = number(columns.left, "left")?;
        let y = number(columns.top, "top")?;
        let conf = number(columns.conf, "conf")?;

        words.push(WordObservation::new(text, x as i64, y as i64, conf, source));
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn report(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn test_parse_word_rows() {
        let tsv = report(&[
            "1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t",
            "4\t1\t1\t1\t1\t0\t12\t30\t300\t20\t-1\t",
            "5\t1\t1\t1\t1\t1\t12\t30\t60\t20\t96.3\tSTONE",
            "5\t1\t1\t1\t1\t2\t80\t31\t90\t20\t91\tBREWING",
            "5\t1\t1\t1\t1\t3\t180\t31\t4\t20\t95\t ",
        ]);
        let words = parse_tsv(&tsv, OcrSource::A).unwrap();

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "STONE");
        assert_eq!(words[0].location, Point::new(12, 30));
        assert_eq!(words[0].confidence, 96.3);
        assert_eq!(words[1].text, "BREWING");
        assert_eq!(words[1].source, OcrSource::A);
    }

    #[test]
    fn test_columns_found_by_name() {
        let tsv = "text\tconf\ttop\tleft\tlevel\nALC\t88\t40\t10\t5\n";
        let words = parse_tsv(tsv, OcrSource::A).unwrap();
        assert_eq!(words, vec![WordObservation::new("ALC", 10, 40, 88.0, OcrSource::A)]);
    }

    #[test]
    fn test_missing_column_rejected() {
        let result = parse_tsv("level\tleft\ttop\ttext\n", OcrSource::A);
        assert!(matches!(result, Err(VerifyError::Transcript(_))));
    }

    #[test]
    fn test_bad_number_rejected() {
        let tsv = report(&["5\t1\t1\t1\t1\t1\tabc\t30\t60\t20\t96\tSTONE"]);
        assert!(matches!(parse_tsv(&tsv, OcrSource::A), Err(VerifyError::Transcript(_))));
    }

    #[test]
    fn test_empty_report_rejected() {
        assert!(parse_tsv("", OcrSource::A).is_err());
    }

    #[tokio::test]
    async fn test_missing_binary_is_provider_failure() {
        let provider = TesseractCliProvider::new("/nonexistent/ttb-tesseract");
        let result = provider.scan(Path::new("label.png"), OcrSource::A).await;
        assert!(matches!(result, Err(VerifyError::OcrProviderFailure { .. })));
    }
}
