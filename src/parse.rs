use std::ffi::{OsStr, OsString};

use bstr::{BStr, ByteSlice};

/// The `FromStr` analog for `&[u8]`.
pub trait FromBytes: Sized {
    type Err;

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Err>;
}

/// A simple extension trait that adds some methods to byte slices.
///
/// `bstr` already gives us most of what we need.
pub trait BytesExt {
    // This would be more naturally named `as_bytes()`, but that creates
    // conflicts with other `as_bytes()` methods.
    fn as_byte_slice(&self) -> &[u8];

    fn parse<T: FromBytes>(&self) -> Result<T, <T as FromBytes>::Err> {
        FromBytes::from_bytes(self.as_byte_slice())
    }
}

impl BytesExt for [u8] {
    fn as_byte_slice(&self) -> &[u8] {
        self
    }
}

/// A simple extension trait that adds some methods to OS strings.
pub trait OsStrExt {
    // Named more verbosely for similar reasons as `BytesExt::as_byte_slice`.
    fn as_os_str_slice(&self) -> &OsStr;

    /// Converts this OS string to a byte slice.
    ///
    /// On Unix, this is a no-op and can never fail. Otherwise, this requires
    /// that the OS string be valid UTF-8.
    fn to_bytes(&self) -> anyhow::Result<&[u8]> {
        let osstr = self.as_os_str_slice();
        <[u8]>::from_os_str(osstr).ok_or_else(|| {
            anyhow::anyhow!(
                "{osstr:?} is not valid UTF-8 but must be \
                 in non-Unix environments",
            )
        })
    }

    /// Converts this OS string to a string slice.
    fn to_str(&self) -> anyhow::Result<&str> {
        Ok(self.to_bytes()?.to_str()?)
    }

    fn parse<T: FromBytes<Err = anyhow::Error>>(&self) -> anyhow::Result<T> {
        FromBytes::from_bytes(self.to_bytes()?)
    }
}

impl OsStrExt for OsStr {
    fn as_os_str_slice(&self) -> &OsStr {
        self
    }
}

impl OsStrExt for OsString {
    fn as_os_str_slice(&self) -> &OsStr {
        self.as_os_str()
    }
}

/// A borrowed line parsed from a stream.
///
/// It absolves callers of needing to futz with line terminators or line
/// numbers.
#[derive(Clone, Copy, Debug)]
pub struct Line<'a> {
    /// The line number, 1-indexed.
    number: usize,
    /// The full line including its line terminator if present.
    full: &'a BStr,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, full: &'a [u8]) -> Line<'a> {
        Line { number, full: full.as_bstr() }
    }

    /// Return the one-indexed line number of this line.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Return only the content of the line, i.e., the line without its
    /// terminator (if present).
    pub fn content(&self) -> &'a BStr {
        let mut content: &[u8] = self.full;
        if let Some(rest) = content.strip_suffix(b"\n") {
            content = rest.strip_suffix(b"\r").unwrap_or(rest);
        }
        content.as_bstr()
    }
}

/// An extension trait for `std::io::BufRead` which provides convenience APIs
/// for dealing with byte strings.
///
/// This is a stripped down version of what's in `bstr::io`. The difference is
/// that errors are `anyhow::Error`, so that the closure can report whatever
/// went wrong with a line without first squeezing it into a
/// `std::io::Error`.
pub trait BufReadExt: std::io::BufRead {
    /// Executes the given closure on each (`\n`|`\r\n`)-terminated line in the
    /// underlying reader.
    ///
    /// Iteration stops early when the closure returns `false` or an error.
    fn for_byte_line<F>(&mut self, mut for_each_line: F) -> anyhow::Result<()>
    where
        Self: Sized,
        F: FnMut(Line<'_>) -> anyhow::Result<bool>,
    {
        let mut number = 0;
        let mut bytes = vec![];
        loop {
            bytes.clear();
            if self.read_until(b'\n', &mut bytes)? == 0 {
                return Ok(());
            }
            number += 1;
            if !for_each_line(Line::new(number, &bytes))? {
                return Ok(());
            }
        }
    }
}

impl<B: std::io::BufRead> BufReadExt for B {}
