// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::Result;
use crate::formatter::StringWriter;
use crate::parameter::{Parameters, ValueType, encoding};
use crate::value::{Valuer, write_head};

/// Inline binary data (RFC 5545 Section 3.3.1), written as standard
/// padded base64.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Binary {
    params: Parameters,
    value: Vec<u8>,
}

impl_with_params!(Binary);

impl Binary {
    /// Binary data, tagged `VALUE=BINARY;ENCODING=BASE64`.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            params: Parameters::new(),
            value: data.into(),
        }
        .with(ValueType::Binary)
        .with(encoding(true))
    }

    /// The raw bytes.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

impl Valuer for Binary {
    fn is_defined(&self) -> bool {
        !self.value.is_empty()
    }

    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        write_head(&self.params, w)?;
        w.write_str(&STANDARD.encode(&self.value)).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: &Binary) -> String {
        let mut out = Vec::new();
        value.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn encodes_base64_with_padding() {
        assert_eq!(render(&Binary::new("ABC")), ";VALUE=BINARY;ENCODING=BASE64:QUJD");
        assert_eq!(
            render(&Binary::new(b"A}~B".to_vec())),
            ";VALUE=BINARY;ENCODING=BASE64:QX1+Qg=="
        );
    }

    #[test]
    fn definedness() {
        assert!(!Binary::default().is_defined());
        assert!(!Binary::new(Vec::new()).is_defined());
        assert!(Binary::new([0_u8]).is_defined());
    }
}
