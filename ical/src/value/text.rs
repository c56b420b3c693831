// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use crate::error::Result;
use crate::formatter::StringWriter;
use crate::keyword::{
    KW_CLASS_CONFIDENTIAL, KW_CLASS_PRIVATE, KW_CLASS_PUBLIC, KW_METHOD_PUBLISH,
    KW_METHOD_REQUEST, KW_STATUS_CANCELLED, KW_STATUS_COMPLETED, KW_STATUS_CONFIRMED,
    KW_STATUS_DRAFT, KW_STATUS_FINAL, KW_STATUS_IN_PROCESS, KW_STATUS_NEEDS_ACTION,
    KW_STATUS_TENTATIVE, KW_TRANSP_OPAQUE, KW_TRANSP_TRANSPARENT,
};
use crate::parameter::{Parameters, ValueType};
use crate::value::{Valuer, write_head};

/// Payload budget of one line produced by [`Text::list_lines`].
const LIST_LINE_LENGTH: usize = 65;

const MAILTO: &str = "mailto:";

/// Escape `\`, `;`, `,` with a backslash and newlines as `\n`
/// (RFC 5545 Section 3.3.11).
///
/// Only these ASCII bytes are rewritten, so multi-byte UTF-8 sequences pass
/// through untouched.
#[must_use]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.bytes().any(|b| matches!(b, b'\\' | b';' | b',' | b'\n')) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' | ';' | ',' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// A text value, or a comma-separated list of texts.
///
/// Every element is escaped when written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Text {
    params: Parameters,
    value: String,
    others: Vec<String>,
}

impl_with_params!(Text);

impl Text {
    /// A single text value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            params: Parameters::new(),
            value: value.into(),
            others: Vec::new(),
        }
    }

    /// A list value written on one line, e.g. for `CATEGORIES`.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = values.into_iter().map(Into::into);
        Self {
            params: Parameters::new(),
            value: iter.next().unwrap_or_default(),
            others: iter.collect(),
        }
    }

    /// One text value per string; each is written as its own property line.
    pub fn texts<I, S>(values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Self::new).collect()
    }

    /// Group the strings into several list values so each line stays short
    /// without relying on folding.
    ///
    /// A group closes once the next string (plus its separator) would push
    /// it past 65 octets; an oversized string forms a group of its own.
    pub fn list_lines<I, S>(values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines = Vec::new();
        let mut group: Vec<String> = Vec::new();
        let mut length = 0;
        for value in values {
            let value = value.into();
            let cost = value.len() + 1;
            if !group.is_empty() && length + cost > LIST_LINE_LENGTH {
                lines.push(Self::list(std::mem::take(&mut group)));
                length = 0;
            }
            length += cost;
            group.push(value);
        }
        if !group.is_empty() {
            lines.push(Self::list(group));
        }
        lines
    }

    /// `PUBLIC` classification.
    #[must_use]
    pub fn public() -> Self {
        Self::new(KW_CLASS_PUBLIC)
    }

    /// `PRIVATE` classification.
    #[must_use]
    pub fn private() -> Self {
        Self::new(KW_CLASS_PRIVATE)
    }

    /// `CONFIDENTIAL` classification.
    #[must_use]
    pub fn confidential() -> Self {
        Self::new(KW_CLASS_CONFIDENTIAL)
    }

    /// `PUBLISH` method.
    #[must_use]
    pub fn publish() -> Self {
        Self::new(KW_METHOD_PUBLISH)
    }

    /// `REQUEST` method.
    #[must_use]
    pub fn request() -> Self {
        Self::new(KW_METHOD_REQUEST)
    }

    /// `TENTATIVE` status.
    #[must_use]
    pub fn tentative() -> Self {
        Self::new(KW_STATUS_TENTATIVE)
    }

    /// `CONFIRMED` status.
    #[must_use]
    pub fn confirmed() -> Self {
        Self::new(KW_STATUS_CONFIRMED)
    }

    /// `CANCELLED` status.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(KW_STATUS_CANCELLED)
    }

    /// `NEEDS-ACTION` status.
    #[must_use]
    pub fn needs_action() -> Self {
        Self::new(KW_STATUS_NEEDS_ACTION)
    }

    /// `COMPLETED` status.
    #[must_use]
    pub fn completed() -> Self {
        Self::new(KW_STATUS_COMPLETED)
    }

    /// `IN-PROCESS` status.
    #[must_use]
    pub fn in_process() -> Self {
        Self::new(KW_STATUS_IN_PROCESS)
    }

    /// `DRAFT` status.
    #[must_use]
    pub fn draft() -> Self {
        Self::new(KW_STATUS_DRAFT)
    }

    /// `FINAL` status.
    #[must_use]
    pub fn r#final() -> Self {
        Self::new(KW_STATUS_FINAL)
    }

    /// `OPAQUE` transparency: the event blocks time.
    #[must_use]
    pub fn opaque() -> Self {
        Self::new(KW_TRANSP_OPAQUE)
    }

    /// `TRANSPARENT` transparency: the event does not block time.
    #[must_use]
    pub fn transparent() -> Self {
        Self::new(KW_TRANSP_TRANSPARENT)
    }

    /// The first (or only) text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Texts after the first, for list values.
    #[must_use]
    pub fn others(&self) -> &[String] {
        &self.others
    }
}

impl Valuer for Text {
    fn is_defined(&self) -> bool {
        !self.value.is_empty()
    }

    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        write_head(&self.params, w)?;
        w.write_str(&escape(&self.value))?;
        for other in &self.others {
            w.write_byte(b',')?;
            w.write_str(&escape(other))?;
        }
        Ok(())
    }
}

/// A URI, or a calendar user address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Uri {
    params: Parameters,
    value: String,
}

impl_with_params!(Uri);

impl Uri {
    /// A URI value, tagged `VALUE=URI`.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            params: Parameters::new(),
            value: uri.into(),
        }
        .with(ValueType::Uri)
    }

    /// A calendar user address; `mailto:` is prefixed when missing.
    pub fn cal_address(address: impl Into<String>) -> Self {
        let mut value = address.into();
        if !value.starts_with(MAILTO) {
            value.insert_str(0, MAILTO);
        }
        Self {
            params: Parameters::new(),
            value,
        }
    }

    /// One URI value per string; each is written as its own property line.
    pub fn uris<I, S>(values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Self::new).collect()
    }

    /// The URI as written.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Valuer for Uri {
    fn is_defined(&self) -> bool {
        !self.value.is_empty()
    }

    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        write_head(&self.params, w)?;
        w.write_str(&self.value).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::{common_name, language};

    fn render(value: &dyn Valuer) -> String {
        let mut out = Vec::new();
        value.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn escapes_special_bytes() {
        assert_eq!(escape("a;b,c\\d\n"), "a\\;b\\,c\\\\d\\n");
        assert_eq!(escape("plain"), "plain");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
        assert_eq!(escape("café; thé"), "café\\; thé");
        assert_ne!(escape(&escape(";")), escape(";"));
    }

    #[test]
    fn text_with_params() {
        let text = Text::new("Annual Employee Review").with(language("en"));
        assert_eq!(render(&text), ";LANGUAGE=en:Annual Employee Review");
        assert!(!Text::default().is_defined());
    }

    #[test]
    fn list_joins_escaped_elements() {
        let list = Text::list(["MEETING", "a,b", "PHONE CALL"]);
        assert_eq!(render(&list), ":MEETING,a\\,b,PHONE CALL");
        assert!(!Text::list(Vec::<String>::new()).is_defined());
        assert!(!Text::list(["", "x"]).is_defined());
    }

    #[test]
    fn list_lines_groups_by_length() {
        let words: Vec<String> = (0..30).map(|i| format!("WORD{i:02}")).collect();
        let lines = Text::list_lines(words.iter().map(String::as_str));
        // each element costs 7 octets, so nine fit in 65
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].value(), "WORD00");
        assert_eq!(lines[0].others().len(), 8);
        assert_eq!(lines[1].value(), "WORD09");
        let total: usize = lines.iter().map(|l| 1 + l.others().len()).sum();
        assert_eq!(total, 30);

        let long = "x".repeat(80);
        let lines = Text::list_lines([long.as_str(), "a"]);
        assert_eq!(lines.len(), 2);
        assert!(Text::list_lines(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn uri_and_cal_address() {
        assert_eq!(
            render(&Uri::new("http://example.com/")),
            ";VALUE=URI:http://example.com/"
        );
        let address = Uri::cal_address("jsmith@example.com").with(common_name("John Smith"));
        assert_eq!(render(&address), ";CN=John Smith:mailto:jsmith@example.com");
        assert_eq!(
            Uri::cal_address("mailto:a@example.com").value(),
            "mailto:a@example.com"
        );
        assert_eq!(Uri::uris(["a", "b"]).len(), 2);
        assert!(!Uri::default().is_defined());
    }

    #[test]
    fn shortcuts() {
        assert_eq!(Text::confidential().value(), "CONFIDENTIAL");
        assert_eq!(Text::needs_action().value(), "NEEDS-ACTION");
        assert_eq!(Text::transparent().value(), "TRANSPARENT");
        assert_eq!(Text::publish().value(), "PUBLISH");
    }
}
