//! Formatted (text) layout for keyword records.
//!
//! Each keyword starts with a header line
//! `" 'NAME    '      COUNT 'TYPE'"`, followed by its values written in
//! the same blocks as the binary layout, [`TypeTag::columns`] values per
//! line. Reading is token based: line structure is not significant, only
//! the token order.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::KeywordError;
use crate::types::{KeywordData, KeywordEntry, TypeTag};

// ── Value formatting ────────────────────────────────────────────

/// Format `v` as a Fortran `0.dddE+xx` number with `digits` mantissa digits.
fn fortran_exponent(v: f64, digits: usize, marker: char) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if v == 0.0 {
        return format!("0.{}{marker}+00", "0".repeat(digits));
    }
    // `{:e}` yields `d.ddde±x`; shift one digit to get `0.dddd` with x+1.
    let sci = format!("{:.*e}", digits - 1, v.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits_str: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}0.{digits_str}{marker}{:+03}", exp + 1)
}

fn format_value_line(data: &KeywordData, range: std::ops::Range<usize>) -> String {
    let mut line = String::new();
    for idx in range {
        match data {
            KeywordData::Int(v) => line.push_str(&format!(" {:>11}", v[idx])),
            KeywordData::Float(v) => line.push_str(&format!(
                "  {:>14}",
                fortran_exponent(f64::from(v[idx]), 8, 'E')
            )),
            KeywordData::Double(v) => line.push_str(&format!(
                "  {:>20}",
                fortran_exponent(v[idx], 14, 'D')
            )),
            KeywordData::Bool(v) => line.push_str(if v[idx] { "  T" } else { "  F" }),
            KeywordData::Char(v) => line.push_str(&format!(" '{:<8}'", v[idx])),
            KeywordData::Message => {}
        }
    }
    line
}

/// Encode a complete keyword in the formatted layout.
///
/// Quotes delimit `CHAR` values, so a value containing `'` is rejected.
/// Nothing is written when the entry is rejected.
pub fn encode_entry(w: &mut dyn Write, entry: &KeywordEntry) -> Result<(), KeywordError> {
    entry.validate()?;
    if let KeywordData::Char(values) = entry.data() {
        if let Some(quoted) = values.iter().find(|s| s.contains('\'')) {
            return Err(KeywordError::InvalidValue {
                name: entry.name().to_string(),
                detail: format!("string {quoted:?} contains a quote"),
            });
        }
    }

    let tag = entry.type_tag();
    writeln!(w, " '{:<8}' {:>11} '{}'", entry.name(), entry.len(), tag)?;

    let block = tag.block_size();
    let columns = tag.columns();
    let len = entry.len();
    let mut block_start = 0;
    while block_start < len {
        let block_end = (block_start + block).min(len);
        let mut line_start = block_start;
        while line_start < block_end {
            let line_end = (line_start + columns).min(block_end);
            writeln!(
                w,
                "{}",
                format_value_line(entry.data(), line_start..line_end)
            )?;
            line_start = line_end;
        }
        block_start = block_end;
    }
    Ok(())
}

// ── Tokenizer ───────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
struct Token {
    text: String,
    quoted: bool,
}

fn tokenize_line(line: &str, out: &mut VecDeque<Token>) -> Result<(), KeywordError> {
    let mut chars = line.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '\'' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            for (_, ch) in chars.by_ref() {
                if ch == '\'' {
                    closed = true;
                    break;
                }
                text.push(ch);
            }
            if !closed {
                return Err(KeywordError::InvalidToken {
                    detail: format!("unterminated quoted string at column {start}"),
                });
            }
            out.push_back(Token { text, quoted: true });
        } else {
            let mut end = line.len();
            while let Some(&(idx, ch)) = chars.peek() {
                if ch.is_whitespace() {
                    end = idx;
                    break;
                }
                chars.next();
            }
            out.push_back(Token {
                text: line[start..end].to_string(),
                quoted: false,
            });
        }
    }
    Ok(())
}

/// Streaming decoder for the formatted layout.
///
/// Owns a line buffer and a queue of pending tokens; records never need
/// to start on a fresh line.
pub struct FormattedDecoder<R: BufRead> {
    reader: R,
    pending: VecDeque<Token>,
    line: String,
}

impl<R: BufRead> FormattedDecoder<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line: String::new(),
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, KeywordError> {
        while self.pending.is_empty() {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            tokenize_line(&self.line, &mut self.pending)?;
        }
        Ok(self.pending.pop_front())
    }

    fn require_token(&mut self, name: &str, what: &str) -> Result<Token, KeywordError> {
        self.next_token()?
            .ok_or_else(|| KeywordError::truncated(name, format!("stream ended before {what}")))
    }

    /// Decode the next keyword, or `None` at a clean end of stream.
    pub fn decode_entry(&mut self) -> Result<Option<KeywordEntry>, KeywordError> {
        let Some(name_tok) = self.next_token()? else {
            return Ok(None);
        };
        if !name_tok.quoted {
            return Err(KeywordError::MalformedHeader {
                detail: format!("expected quoted keyword name, found '{}'", name_tok.text),
            });
        }
        let name = name_tok.text.trim_end().to_string();

        let count_tok = self.require_token(&name, "element count")?;
        let count: usize = count_tok
            .text
            .parse()
            .map_err(|_| KeywordError::MalformedHeader {
                detail: format!("keyword '{name}' has invalid count '{}'", count_tok.text),
            })?;
        let tag_tok = self.require_token(&name, "element type")?;
        let tag = TypeTag::parse(&tag_tok.text).ok_or_else(|| KeywordError::UnknownType {
            tag: tag_tok.text.clone(),
        })?;

        let data = self.decode_values(&name, tag, count)?;
        Ok(Some(KeywordEntry::new(&name, data)))
    }

    fn decode_values(
        &mut self,
        name: &str,
        tag: TypeTag,
        count: usize,
    ) -> Result<KeywordData, KeywordError> {
        let mut data = KeywordData::empty(tag);
        if tag == TypeTag::Message {
            return Ok(data);
        }
        for idx in 0..count {
            let tok = self.next_token()?.ok_or_else(|| {
                KeywordError::truncated(name, format!("read {idx} of {count} values"))
            })?;
            let bad = |t: &Token| KeywordError::InvalidToken {
                detail: format!("'{}' is not a valid {tag} value in '{name}'", t.text),
            };
            match &mut data {
                KeywordData::Int(v) => v.push(tok.text.parse().map_err(|_| bad(&tok))?),
                KeywordData::Float(v) => {
                    let x = parse_fortran_float(&tok.text).ok_or_else(|| bad(&tok))?;
                    v.push(x as f32);
                }
                KeywordData::Double(v) => {
                    v.push(parse_fortran_float(&tok.text).ok_or_else(|| bad(&tok))?);
                }
                KeywordData::Bool(v) => v.push(match tok.text.as_str() {
                    "T" | ".TRUE." => true,
                    "F" | ".FALSE." => false,
                    _ => return Err(bad(&tok)),
                }),
                KeywordData::Char(v) => {
                    if !tok.quoted {
                        return Err(bad(&tok));
                    }
                    v.push(tok.text.trim_end().to_string());
                }
                KeywordData::Message => {}
            }
        }
        Ok(data)
    }
}

/// Parse a float that may use a Fortran `D` exponent marker.
fn parse_fortran_float(text: &str) -> Option<f64> {
    text.replace(['D', 'd'], "E").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(entry: &KeywordEntry) -> String {
        let mut buf = Vec::new();
        encode_entry(&mut buf, entry).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn decode(text: &str) -> Result<Option<KeywordEntry>, KeywordError> {
        FormattedDecoder::new(text.as_bytes()).decode_entry()
    }

    #[test]
    fn fortran_exponent_shapes() {
        assert_eq!(fortran_exponent(1234.5, 8, 'E'), "0.12345000E+04");
        assert_eq!(fortran_exponent(-0.015, 8, 'E'), "-0.15000000E-01");
        assert_eq!(fortran_exponent(0.0, 8, 'E'), "0.00000000E+00");
        assert_eq!(fortran_exponent(1.0, 14, 'D'), "0.10000000000000D+01");
    }

    #[test]
    fn header_line_layout() {
        let text = encode(&KeywordEntry::new("DIMENS", KeywordData::Int(vec![1, 2])));
        let first = text.lines().next().unwrap();
        assert_eq!(first, " 'DIMENS  '           2 'INTE'");
    }

    #[test]
    fn ints_wrap_at_six_columns() {
        let text = encode(&KeywordEntry::new("NUMS", KeywordData::Int((0..8).collect())));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].split_whitespace().count(), 6);
        assert_eq!(lines[2].split_whitespace().count(), 2);
    }

    #[test]
    fn decodes_every_type() {
        let entries = vec![
            KeywordEntry::new("NUMS", KeywordData::Int(vec![-1, 0, 42])),
            KeywordEntry::new("PARAMS", KeywordData::Float(vec![0.5, -1250.0, 0.125])),
            KeywordEntry::new("DEPTH", KeywordData::Double(vec![2000.125, -0.001])),
            KeywordEntry::new("LOGIHEAD", KeywordData::Bool(vec![true, false, true])),
            KeywordEntry::new("WGNAMES", KeywordData::Char(vec!["OP 1".into(), "".into()])),
            KeywordEntry::new("STARTSOL", KeywordData::Message),
        ];
        let mut buf = Vec::new();
        for e in &entries {
            encode_entry(&mut buf, e).unwrap();
        }
        let mut dec = FormattedDecoder::new(buf.as_slice());
        for e in &entries {
            assert_eq!(&dec.decode_entry().unwrap().unwrap(), e);
        }
        assert!(dec.decode_entry().unwrap().is_none());
    }

    #[test]
    fn accepts_d_exponent_and_free_layout() {
        let e = decode(" 'TIME    ' 2 'DOUB'  0.1D+02\n 0.25D+01").unwrap().unwrap();
        assert_eq!(e.as_doubles().unwrap(), &[10.0, 2.5]);
    }

    #[test]
    fn short_payload_is_truncated() {
        assert!(matches!(
            decode(" 'SWAT    '           3 'REAL'\n   0.1E+00   0.2E+00\n"),
            Err(KeywordError::TruncatedRecord { .. })
        ));
    }

    #[test]
    fn rejected_entries_write_nothing() {
        for entry in [
            KeywordEntry::new("NAMES", KeywordData::Char(vec!["O'NEIL".into()])),
            KeywordEntry::new("NAMES", KeywordData::Char(vec!["OK".into(), "TOO-LONG-1".into()])),
            KeywordEntry::new("ÅÅÅÅ", KeywordData::Int(vec![1])),
        ] {
            let mut buf = Vec::new();
            assert!(matches!(
                encode_entry(&mut buf, &entry),
                Err(KeywordError::InvalidValue { .. })
            ));
            assert!(buf.is_empty());
        }
    }

    #[test]
    fn bad_tokens_are_reported() {
        assert!(matches!(
            decode(" 'NUMS    '           1 'INTE'\n  abc\n"),
            Err(KeywordError::InvalidToken { .. })
        ));
        assert!(matches!(
            decode(" 'NAMES   '           1 'CHAR'\n 'OPEN\n"),
            Err(KeywordError::InvalidToken { .. })
        ));
        assert!(matches!(
            decode(" NUMS 1 'INTE'\n 1\n"),
            Err(KeywordError::MalformedHeader { .. })
        ));
    }
}
