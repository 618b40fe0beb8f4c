//! Byte classes of the response head grammar.

/// `tchar` from [RFC 9110]: the characters allowed in a header field name.
///
/// [RFC 9110]: <https://datatracker.ietf.org/doc/html/rfc9110#name-tokens>
pub(crate) const fn is_token(byte: u8) -> bool {
    matches!(
        byte,
        b'!' | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'\''
            | b'*'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~'
            | b'0'..=b'9'
            | b'a'..=b'z'
            | b'A'..=b'Z'
    )
}

/// Field value content: VCHAR, SP, HTAB, or obs-text. Control characters are
/// rejected so a stray CR cannot smuggle a line break downstream.
pub(crate) const fn is_value(byte: u8) -> bool {
    matches!(byte, b'\t' | b' '..=b'~' | 0x80..)
}
