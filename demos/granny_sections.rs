//! Parse a Granny2 (.gr2) file, list its sections, and extract them.
//!
//! Usage:
//!   cargo run --release --example granny_sections -- model.gr2 output_dir/
//!
//! The Granny2 container walk lives entirely in this example; the library
//! itself only decodes section payloads.

use std::path::Path;

use oodle1::HEADER_SIZE;

/// Granny2 little-endian signature (version 6 era).
const SIGNATURE: [u8; 16] = [
    0xB8, 0x67, 0xB0, 0xCA, 0xF8, 0x6D, 0xB1, 0x0F, //
    0x84, 0x72, 0x8C, 0x7E, 0x5E, 0x19, 0x00, 0x1E,
];

const SECTION_HEADER_SIZE: usize = 44;

/// Section payload encodings.
const ENCODING_RAW: u32 = 0;
const ENCODING_OODLE1: u32 = 2;

struct SectionHeader {
    encoding: u32,
    file_offset: usize,
    file_size: usize,
    mem_size: usize,
    stream0_stop: usize,
    stream1_stop: usize,
}

struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn read_u32(&mut self) -> Result<u32, String> {
        let bytes = self
            .data
            .get(self.offset..self.offset + 4)
            .ok_or("unexpected end of file")?;
        self.offset += 4;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn skip(&mut self, count: usize) {
        self.offset += count;
    }
}

fn parse_sections(raw: &[u8]) -> Result<Vec<SectionHeader>, String> {
    if raw.len() < 64 {
        return Err("file is implausibly small".into());
    }
    if raw[..16] != SIGNATURE {
        return Err("invalid Granny2 magic bytes".into());
    }

    let mut reader = Reader::new(&raw[16..]);
    let _total_header_size = reader.read_u32()?;
    reader.skip(12);
    let data_base = 16 + reader.offset;

    let version = reader.read_u32()?;
    if version != 6 {
        return Err(format!("unsupported Granny2 version {}", version));
    }
    let total_file_size = reader.read_u32()? as usize;
    if total_file_size != raw.len() {
        return Err(format!(
            "file claims length {}, but is actually {}",
            total_file_size,
            raw.len()
        ));
    }
    let _crc = reader.read_u32()?;
    let section_offset = reader.read_u32()? as usize + data_base;
    let section_count = reader.read_u32()? as usize;

    if section_offset + section_count * SECTION_HEADER_SIZE > raw.len() {
        return Err("section table lies outside the file".into());
    }

    let mut sections = Vec::with_capacity(section_count);
    let mut reader = Reader::new(&raw[section_offset..]);
    for index in 0..section_count {
        let encoding = reader.read_u32()?;
        let file_offset = reader.read_u32()? as usize;
        let file_size = reader.read_u32()? as usize;
        let mem_size = reader.read_u32()? as usize;
        let _alignment = reader.read_u32()?;
        let stream0_stop = reader.read_u32()? as usize;
        let stream1_stop = reader.read_u32()? as usize;
        reader.skip(16); // relocation and marshalling tables

        if file_offset + file_size > raw.len() {
            return Err(format!("section {} payload lies outside the file", index));
        }
        sections.push(SectionHeader {
            encoding,
            file_offset,
            file_size,
            mem_size,
            stream0_stop,
            stream1_stop,
        });
    }
    Ok(sections)
}

fn decode_section(raw: &[u8], section: &SectionHeader) -> Result<Vec<u8>, String> {
    let payload = &raw[section.file_offset..section.file_offset + section.file_size];
    match section.encoding {
        ENCODING_RAW => Ok(payload.to_vec()),
        ENCODING_OODLE1 => {
            if payload.len() < 3 * HEADER_SIZE {
                return Err("Oodle1 section is too short for its headers".into());
            }
            let stops = [section.stream0_stop, section.stream1_stop, section.mem_size];
            oodle1::decompress(payload, &stops).map_err(|e| e.to_string())
        }
        other => Err(format!("unsupported section encoding {}", other)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: granny_sections <model.gr2> <output_dir>");
        eprintln!("  granny_sections ./tree.gr2 ./out/");
        std::process::exit(1);
    }

    let raw = std::fs::read(&args[1])?;
    let output_dir = Path::new(&args[2]);
    std::fs::create_dir_all(output_dir)?;

    let sections = parse_sections(&raw)?;
    println!("{} section(s):", sections.len());
    for (index, section) in sections.iter().enumerate() {
        println!(
            "  #{} encoding {} packed {} -> {} bytes",
            index, section.encoding, section.file_size, section.mem_size
        );
    }

    for (index, section) in sections.iter().enumerate() {
        if section.mem_size == 0 {
            continue;
        }
        let decoded = decode_section(&raw, section)?;
        let out_path = output_dir.join(format!("section_{:02}.bin", index));
        std::fs::write(&out_path, &decoded)?;
        println!("Extracted section {} ({} bytes)", index, decoded.len());
    }

    Ok(())
}
