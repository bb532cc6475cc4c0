// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use geocloud_type::{
	DATE_FIELD_SIZE, Error, FieldType, GetFieldType, Result, TEXT_FIELD_SIZE, format_float, parse_float,
	parse_leading_float,
};

use super::{
	layout::{FieldSlot, RecordLayout},
	record::Record,
};

const MAX_SLOT_SIZE: usize = if TEXT_FIELD_SIZE > DATE_FIELD_SIZE {
	TEXT_FIELD_SIZE
} else {
	DATE_FIELD_SIZE
};

/// Fixed width numeric value that can live in a record slot.
pub trait NativeValue: GetFieldType + Copy {
	const SIZE: usize;

	fn read(bytes: &[u8]) -> Self;

	fn write(self, bytes: &mut [u8]);

	fn from_f64(value: f64) -> Self;

	fn to_f64(self) -> f64;
}

macro_rules! impl_native_value {
	($($t:ty),*) => {
		$(
			impl NativeValue for $t {
				const SIZE: usize = std::mem::size_of::<$t>();

				#[inline]
				fn read(bytes: &[u8]) -> Self {
					let mut buf = [0u8; std::mem::size_of::<$t>()];
					buf.copy_from_slice(&bytes[..Self::SIZE]);
					<$t>::from_le_bytes(buf)
				}

				#[inline]
				fn write(self, bytes: &mut [u8]) {
					bytes[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
				}

				#[inline]
				fn from_f64(value: f64) -> Self {
					value as $t
				}

				#[inline]
				fn to_f64(self) -> f64 {
					self as f64
				}
			}
		)*
	};
}

impl_native_value!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Writes `value` into the slot, cast to the slot's native width.
/// Text and date slots receive the decimal representation.
pub fn encode_f64(slot: &FieldSlot, record: &mut [u8], value: f64) {
	let bytes = &mut record[slot.offset..slot.end()];
	match slot.field_type {
		FieldType::Uint1 => u8::from_f64(value).write(bytes),
		FieldType::Int1 => i8::from_f64(value).write(bytes),
		FieldType::Uint2 => u16::from_f64(value).write(bytes),
		FieldType::Int2 => i16::from_f64(value).write(bytes),
		FieldType::Uint4 => u32::from_f64(value).write(bytes),
		FieldType::Int4 => i32::from_f64(value).write(bytes),
		FieldType::Uint8 => u64::from_f64(value).write(bytes),
		FieldType::Int8 => i64::from_f64(value).write(bytes),
		FieldType::Float4 => f32::from_f64(value).write(bytes),
		FieldType::Float8 => value.write(bytes),
		FieldType::Text | FieldType::Date => write_text(bytes, &format_float(value)),
	}
}

/// Reads the slot widened to `f64`. Text and date slots are parsed for a
/// leading number and yield 0 when there is none.
pub fn decode_f64(slot: &FieldSlot, record: &[u8]) -> f64 {
	let bytes = &record[slot.offset..slot.end()];
	match slot.field_type {
		FieldType::Uint1 => u8::read(bytes).to_f64(),
		FieldType::Int1 => i8::read(bytes).to_f64(),
		FieldType::Uint2 => u16::read(bytes).to_f64(),
		FieldType::Int2 => i16::read(bytes).to_f64(),
		FieldType::Uint4 => u32::read(bytes).to_f64(),
		FieldType::Int4 => i32::read(bytes).to_f64(),
		FieldType::Uint8 => u64::read(bytes).to_f64(),
		FieldType::Int8 => i64::read(bytes).to_f64(),
		FieldType::Float4 => f32::read(bytes).to_f64(),
		FieldType::Float8 => f64::read(bytes),
		FieldType::Text | FieldType::Date => parse_leading_float(&read_text(bytes)).unwrap_or(0.0),
	}
}

/// Writes text verbatim into text and date slots. Numeric slots only accept
/// text that parses as a number.
pub fn encode_str(slot: &FieldSlot, record: &mut [u8], value: &str) -> Result<()> {
	if slot.field_type.is_textual() {
		write_text(&mut record[slot.offset..slot.end()], value);
		return Ok(());
	}

	let number = parse_float(value).ok_or_else(|| Error::InvalidNumber {
		text: value.to_string(),
		field_type: slot.field_type,
	})?;
	encode_f64(slot, record, number);
	Ok(())
}

pub fn decode_string(slot: &FieldSlot, record: &[u8]) -> String {
	let bytes = &record[slot.offset..slot.end()];
	match slot.field_type {
		FieldType::Uint1 => u8::read(bytes).to_string(),
		FieldType::Int1 => i8::read(bytes).to_string(),
		FieldType::Uint2 => u16::read(bytes).to_string(),
		FieldType::Int2 => i16::read(bytes).to_string(),
		FieldType::Uint4 => u32::read(bytes).to_string(),
		FieldType::Int4 => i32::read(bytes).to_string(),
		FieldType::Uint8 => u64::read(bytes).to_string(),
		FieldType::Int8 => i64::read(bytes).to_string(),
		FieldType::Float4 => {
			let value = f32::read(bytes);
			if !value.is_finite() {
				return format_float(value as f64);
			}
			let plain = format!("{}", value);
			if plain.len() <= TEXT_FIELD_SIZE {
				plain
			} else {
				format!("{:e}", value)
			}
		}
		FieldType::Float8 => format_float(f64::read(bytes)),
		FieldType::Text | FieldType::Date => read_text(bytes),
	}
}

/// Copies a slot value between two records, converting between types.
/// Textual to textual copies keep the raw bytes.
pub fn convert(from: &FieldSlot, source: &[u8], to: &FieldSlot, target: &mut [u8]) {
	if from.field_type.is_textual() && to.field_type.is_textual() {
		write_text(&mut target[to.offset..to.end()], &read_text(&source[from.offset..from.end()]));
	} else if to.field_type.is_textual() {
		write_text(&mut target[to.offset..to.end()], &decode_string(from, source));
	} else {
		encode_f64(to, target, decode_f64(from, source));
	}
}

/// [`convert`] between two slots of the same record.
pub fn convert_within(from: &FieldSlot, to: &FieldSlot, record: &mut [u8]) {
	let mut scratch = [0u8; MAX_SLOT_SIZE];
	scratch[..from.size].copy_from_slice(&record[from.offset..from.end()]);
	let detached = FieldSlot {
		offset: 0,
		..*from
	};
	convert(&detached, &scratch, to, record);
}

fn write_text(slot: &mut [u8], value: &str) {
	let mut len = value.len().min(slot.len());
	while !value.is_char_boundary(len) {
		len -= 1;
	}
	slot[..len].copy_from_slice(&value.as_bytes()[..len]);
	slot[len..].fill(0);
}

fn read_text(slot: &[u8]) -> String {
	let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
	String::from_utf8_lossy(&slot[..end]).into_owned()
}

impl RecordLayout {
	fn checked_slot(&self, index: usize) -> Result<&FieldSlot> {
		self.slot(index).ok_or(Error::FieldOutOfRange {
			index,
			count: self.field_count(),
		})
	}

	pub fn set_f64(&self, record: &mut Record, index: usize, value: f64) -> Result<()> {
		let slot = self.checked_slot(index)?;
		debug_assert_eq!(record.len(), self.record_size());
		encode_f64(slot, record.make_mut(), value);
		record.set_modified(true);
		Ok(())
	}

	pub fn get_f64(&self, record: &Record, index: usize) -> Option<f64> {
		let slot = self.slot(index)?;
		debug_assert_eq!(record.len(), self.record_size());
		Some(decode_f64(slot, record))
	}

	pub fn set_str(&self, record: &mut Record, index: usize, value: &str) -> Result<()> {
		let slot = self.checked_slot(index)?;
		debug_assert_eq!(record.len(), self.record_size());
		encode_str(slot, record.make_mut(), value)?;
		record.set_modified(true);
		Ok(())
	}

	pub fn get_string(&self, record: &Record, index: usize) -> Option<String> {
		let slot = self.slot(index)?;
		debug_assert_eq!(record.len(), self.record_size());
		Some(decode_string(slot, record))
	}

	/// Typed write; `None` when the field does not hold a `T`.
	pub fn set_native<T: NativeValue>(&self, record: &mut Record, index: usize, value: T) -> Option<()> {
		let slot = self.slot(index).filter(|slot| slot.field_type == T::field_type())?;
		value.write(&mut record.make_mut()[slot.offset..slot.end()]);
		record.set_modified(true);
		Some(())
	}

	pub fn get_native<T: NativeValue>(&self, record: &Record, index: usize) -> Option<T> {
		let slot = self.slot(index).filter(|slot| slot.field_type == T::field_type())?;
		Some(T::read(&record[slot.offset..slot.end()]))
	}
}
