//! Base64 and display helpers for file payloads

use base64::{engine::general_purpose::STANDARD, Engine};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Render a byte count for display
///
/// `"{n} B"` below 1 KiB, `"{n.n} KB"` below 1 MiB, `"{n.n} MB"` otherwise.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

/// Check that `input` is standard RFC 4648 base64
///
/// Alphabet `[A-Za-z0-9+/]`, total length a multiple of 4 and at most two
/// trailing `=`. The empty string is valid.
pub fn validate_base64(input: &str) -> bool {
    if input.len() % 4 != 0 {
        return false;
    }

    let body = input.trim_end_matches('=');
    if input.len() - body.len() > 2 {
        return false;
    }

    body.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Number of bytes `input` decodes to, derived from its length and padding
pub fn decoded_size(input: &str) -> usize {
    let padding = input.len() - input.trim_end_matches('=').len();
    (input.len() / 4 * 3).saturating_sub(padding.min(2))
}

/// Build a `data:<mime>;base64,<payload>` URL for raw bytes
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Strip the `data:<mime>;base64,` prefix of a data URL
///
/// Input without a prefix is returned unchanged.
pub fn strip_data_url(data_url: &str) -> &str {
    if data_url.starts_with("data:") {
        data_url
            .split_once(',')
            .map(|(_, payload)| payload)
            .unwrap_or("")
    } else {
        data_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_572_864), "1.5 MB");
        assert_eq!(format_file_size(2_097_152), "2.0 MB");
    }

    #[test]
    fn test_validate_base64_accepts_padding_variants() {
        assert!(validate_base64(""));
        assert!(validate_base64("AA=="));
        assert!(validate_base64("AAA="));
        assert!(validate_base64("AAAA"));
        assert!(validate_base64("aGVsbG8gd29ybGQ+Pz8/"));
    }

    #[test]
    fn test_validate_base64_rejects_malformed() {
        assert!(!validate_base64("AAA"));
        assert!(!validate_base64("A==="));
        assert!(!validate_base64("AA-_"));
        assert!(!validate_base64("AA A"));
        assert!(!validate_base64("A=AA"));
    }

    #[test]
    fn test_decoded_size_matches_engine() {
        for len in [0usize, 1, 2, 3, 4, 5, 1000] {
            let data = vec![0xABu8; len];
            let encoded = STANDARD.encode(&data);
            assert_eq!(decoded_size(&encoded), len, "length {}", len);
        }
    }

    #[test]
    fn test_data_url_round_trip() {
        let url = to_data_url("image/png", &[1, 2, 3]);
        assert_eq!(url, "data:image/png;base64,AQID");
        assert_eq!(strip_data_url(&url), "AQID");
    }

    #[test]
    fn test_strip_data_url_edge_cases() {
        assert_eq!(strip_data_url("data:application/pdf;base64,"), "");
        assert_eq!(strip_data_url("data:broken"), "");
        assert_eq!(strip_data_url("AQID"), "AQID");
    }
}
