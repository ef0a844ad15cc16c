/// One NUL-terminated string recovered from a section's raw bytes, paired
/// with its starting offset within the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringRecord {
    pub offset: usize,
    pub text: String,
}

/// Split `data` into NUL-terminated records, scanning left to right.
///
/// `max_count` of 0 means unbounded; otherwise at most `max_count` records
/// are returned. A buffer containing no NUL at all (including the empty
/// buffer) yields a single record covering the whole buffer.
pub fn scan(data: &[u8], max_count: usize) -> Vec<StringRecord> {
    scan_inner(data, max_count, false)
}

/// Legacy variant of [`scan`] that stops only once the record count
/// *exceeds* `max_count`, so a nonzero bound can yield `max_count + 1`
/// records.
pub fn scan_compat(data: &[u8], max_count: usize) -> Vec<StringRecord> {
    scan_inner(data, max_count, true)
}

fn scan_inner(data: &[u8], max_count: usize, compat: bool) -> Vec<StringRecord> {
    let mut records = Vec::new();
    let mut marker = 0;
    for (index, &b) in data.iter().enumerate() {
        if max_count != 0 {
            let full = if compat {
                records.len() > max_count
            } else {
                records.len() == max_count
            };
            if full {
                break;
            }
        }
        if b == 0 {
            records.push(StringRecord {
                offset: marker,
                text: decode(&data[marker..index]),
            });
            marker = index + 1;
        }
    }
    if records.is_empty() {
        records.push(StringRecord {
            offset: 0,
            text: decode(data),
        });
    }
    records
}

// Every byte maps to the same-numbered char; no multi-byte decoding.
fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
