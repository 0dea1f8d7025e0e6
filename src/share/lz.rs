//! LZ compression rendered in a URI component safe alphabet.
//!
//! Bit-compatible with the `compressToEncodedURIComponent` and
//! `decompressFromEncodedURIComponent` pair of the lz-string JavaScript
//! library, so tokens minted by the browser editor decode here and vice
//! versa. The compressor works on UTF-16 code units because that is the
//! unit the browser side indexes strings by.

use std::collections::{HashMap, HashSet};

/// Output alphabet. Every character is legal in a URL fragment without
/// percent encoding. The compressor only emits the first 64; `$` is
/// accepted on input with value 64.
const URI_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+-";

/// Bits carried by one output character.
const BITS_PER_CHAR: u32 = 6;

/// Highest bit of a six bit input value; reading starts there.
const READ_RESET: u32 = 32;

/// Code marking a literal code unit below 256.
const LITERAL_NARROW: usize = 0;

/// Code marking a literal 16 bit code unit.
const LITERAL_WIDE: usize = 1;

/// Code ending the compressed stream.
const END_OF_STREAM: usize = 2;

/// Compresses text into a URI component safe token.
///
/// Empty input still produces a token (the bare end of stream marker).
///
/// # Examples
///
/// ```
/// use markshare::share::lz;
///
/// assert_eq!(lz::compress_to_uri_component("hello"), "BYUwNmD2Q");
/// ```
pub fn compress_to_uri_component(input: &str) -> String {
    let units: Vec<u16> = input.encode_utf16().collect();
    Compressor::default().run(&units)
}

/// Decompresses a token produced by [`compress_to_uri_component`].
///
/// Returns `None` when the token contains characters outside the alphabet,
/// ends before the end of stream marker, references an unknown dictionary
/// entry, or decompresses to invalid UTF-16. Spaces are read as `+`, since
/// form decoding along the way may have turned one into the other.
pub fn decompress_from_uri_component(input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }

    let values = input
        .chars()
        .map(|ch| alphabet_value(if ch == ' ' { '+' } else { ch }))
        .collect::<Option<Vec<u32>>>()?;

    let units = decompress(&values)?;
    String::from_utf16(&units).ok()
}

fn alphabet_value(ch: char) -> Option<u32> {
    match ch {
        'A'..='Z' => Some(ch as u32 - 'A' as u32),
        'a'..='z' => Some(ch as u32 - 'a' as u32 + 26),
        '0'..='9' => Some(ch as u32 - '0' as u32 + 52),
        '+' => Some(62),
        '-' => Some(63),
        '$' => Some(64),
        _ => None,
    }
}

/// Packs codes least significant bit first into alphabet characters.
#[derive(Default)]
struct BitWriter {
    val: u32,
    position: u32,
    out: String,
}

impl BitWriter {
    fn write(&mut self, num_bits: usize, mut value: usize) {
        for _ in 0..num_bits {
            self.val = (self.val << 1) | (value & 1) as u32;
            if self.position == BITS_PER_CHAR - 1 {
                self.position = 0;
                self.out.push(URI_ALPHABET[self.val as usize] as char);
                self.val = 0;
            } else {
                self.position += 1;
            }
            value >>= 1;
        }
    }

    fn finish(mut self) -> String {
        loop {
            self.val <<= 1;
            if self.position == BITS_PER_CHAR - 1 {
                self.out.push(URI_ALPHABET[self.val as usize] as char);
                break;
            }
            self.position += 1;
        }
        self.out
    }
}

/// Current phrase: its dictionary code, plus the code unit when the phrase
/// is a single unit.
#[derive(Clone, Copy)]
struct Phrase {
    code: usize,
    unit: Option<u16>,
}

/// LZW style compressor state.
///
/// Phrases longer than one unit are keyed by (prefix code, next unit),
/// which identifies the same strings as keying by the full text.
struct Compressor {
    units: HashMap<u16, usize>,
    phrases: HashMap<(usize, u16), usize>,
    pending: HashSet<u16>,
    dict_size: usize,
    num_bits: usize,
    enlarge_in: usize,
    writer: BitWriter,
}

impl Default for Compressor {
    fn default() -> Self {
        Self {
            units: HashMap::new(),
            phrases: HashMap::new(),
            pending: HashSet::new(),
            dict_size: 3,
            num_bits: 2,
            enlarge_in: 2,
            writer: BitWriter::default(),
        }
    }
}

impl Compressor {
    fn run(mut self, input: &[u16]) -> String {
        let mut current: Option<Phrase> = None;

        for &unit in input {
            let unit_code = match self.units.get(&unit) {
                Some(&code) => code,
                None => {
                    let code = self.next_code();
                    self.units.insert(unit, code);
                    self.pending.insert(unit);
                    code
                }
            };

            let single = Phrase {
                code: unit_code,
                unit: Some(unit),
            };

            current = Some(match current {
                None => single,
                Some(phrase) => match self.phrases.get(&(phrase.code, unit)) {
                    Some(&code) => Phrase { code, unit: None },
                    None => {
                        self.emit(phrase);
                        let code = self.next_code();
                        self.phrases.insert((phrase.code, unit), code);
                        single
                    }
                },
            });
        }

        if let Some(phrase) = current {
            self.emit(phrase);
        }

        self.writer.write(self.num_bits, END_OF_STREAM);
        self.writer.finish()
    }

    fn next_code(&mut self) -> usize {
        let code = self.dict_size;
        self.dict_size += 1;
        code
    }

    /// Writes a phrase; the first occurrence of a unit goes out as a literal.
    fn emit(&mut self, phrase: Phrase) {
        let literal = phrase.unit.filter(|unit| self.pending.contains(unit));

        match literal {
            Some(unit) => {
                self.pending.remove(&unit);
                if unit < 256 {
                    self.writer.write(self.num_bits, LITERAL_NARROW);
                    self.writer.write(8, unit as usize);
                } else {
                    self.writer.write(self.num_bits, LITERAL_WIDE);
                    self.writer.write(16, unit as usize);
                }
                self.shrink_window();
            }
            None => self.writer.write(self.num_bits, phrase.code),
        }

        self.shrink_window();
    }

    fn shrink_window(&mut self) {
        self.enlarge_in -= 1;
        if self.enlarge_in == 0 {
            self.enlarge_in = 1 << self.num_bits;
            self.num_bits += 1;
        }
    }
}

/// Reads codes least significant bit first out of alphabet values.
struct BitReader<'a> {
    values: &'a [u32],
    val: u32,
    position: u32,
    index: usize,
}

impl<'a> BitReader<'a> {
    fn new(values: &'a [u32]) -> Self {
        Self {
            values,
            val: values.first().copied().unwrap_or(0),
            position: READ_RESET,
            index: 1,
        }
    }

    fn read(&mut self, num_bits: usize) -> usize {
        let mut bits = 0;
        for i in 0..num_bits {
            let set = self.val & self.position != 0;
            self.position >>= 1;
            if self.position == 0 {
                self.position = READ_RESET;
                // Reads past the end yield zero bits until the loop notices.
                self.val = self.values.get(self.index).copied().unwrap_or(0);
                self.index += 1;
            }
            if set {
                bits |= 1 << i;
            }
        }
        bits
    }

    fn exhausted(&self) -> bool {
        self.index > self.values.len()
    }
}

/// Dictionary entry on the decompression side. Every phrase entry is a
/// span of the output already produced.
#[derive(Clone, Copy)]
enum Entry {
    Literal(u16),
    Span { start: usize, len: usize },
}

/// Codes 0 to 2 are control codes, so dictionary slot `i` holds code `i + 3`.
const FIRST_PHRASE_CODE: usize = 3;

fn decompress(values: &[u32]) -> Option<Vec<u16>> {
    let mut reader = BitReader::new(values);

    let first = match reader.read(2) {
        LITERAL_NARROW => reader.read(8) as u16,
        LITERAL_WIDE => reader.read(16) as u16,
        END_OF_STREAM => return Some(Vec::new()),
        _ => return None,
    };

    let mut out = vec![first];
    let mut dictionary = vec![Entry::Literal(first)];
    let mut previous = (0usize, 1usize);
    let mut enlarge_in: usize = 4;
    let mut num_bits: usize = 3;

    loop {
        if reader.exhausted() {
            return None;
        }

        let mut code = reader.read(num_bits);
        match code {
            LITERAL_NARROW | LITERAL_WIDE => {
                let width = if code == LITERAL_NARROW { 8 } else { 16 };
                dictionary.push(Entry::Literal(reader.read(width) as u16));
                code = dictionary.len() - 1 + FIRST_PHRASE_CODE;
                enlarge_in -= 1;
            }
            END_OF_STREAM => return Some(out),
            _ => {}
        }

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }

        let start = out.len();
        let (prev_start, prev_len) = previous;
        match dictionary.get(code - FIRST_PHRASE_CODE).copied() {
            Some(Entry::Literal(unit)) => out.push(unit),
            Some(Entry::Span { start: from, len }) => out.extend_from_within(from..from + len),
            // The phrase being defined by this very step.
            None if code == dictionary.len() + FIRST_PHRASE_CODE => {
                let head = out[prev_start];
                out.extend_from_within(prev_start..prev_start + prev_len);
                out.push(head);
            }
            None => return None,
        }

        // Previous phrase plus the first unit of this one; both are adjacent
        // in the output.
        dictionary.push(Entry::Span {
            start: prev_start,
            len: prev_len + 1,
        });
        enlarge_in -= 1;
        previous = (start, out.len() - start);

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }
    }
}
