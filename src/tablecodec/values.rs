//! Row value decoding

use crate::codec::{self, CodecError, CodecResult};
use crate::tipb::ColumnInfo;
use crate::types::{Datum, FieldType};

/// Field types of the given columns, in column order.
pub fn columns_to_field_types(columns: &[ColumnInfo]) -> Vec<FieldType> {
    columns.iter().map(|c| c.tp).collect()
}

/// Encodes one row's column values.
pub fn encode_values(values: &[Datum]) -> Vec<u8> {
    codec::encode_value(values)
}

/// Decodes one row's column values against `fields`.
///
/// The row must hold exactly one datum per field, and each datum must be
/// convertible to its field's type.
pub fn decode_values(data: &[u8], fields: &[FieldType]) -> CodecResult<Vec<Datum>> {
    let datums = codec::decode(data)?;
    if datums.len() != fields.len() {
        return Err(CodecError::ColumnCount {
            expected: fields.len(),
            actual: datums.len(),
        });
    }
    datums
        .into_iter()
        .zip(fields)
        .enumerate()
        .map(|(column, (datum, &field))| unflatten(column, datum, field))
        .collect()
}

/// Converts a raw datum to the representation of its field type.
fn unflatten(column: usize, datum: Datum, field: FieldType) -> CodecResult<Datum> {
    let mismatch = |d: &Datum| CodecError::TypeMismatch {
        column,
        field,
        datum: d.kind(),
    };
    match (field, datum) {
        (_, Datum::Null) => Ok(Datum::Null),
        (FieldType::Int, d @ Datum::I64(_)) => Ok(d),
        (FieldType::UnsignedInt, d @ Datum::U64(_)) => Ok(d),
        (FieldType::UnsignedInt, Datum::I64(v)) if v >= 0 => Ok(Datum::U64(v as u64)),
        (FieldType::Float, Datum::F64(v)) => Ok(Datum::F64(f64::from(v as f32))),
        (FieldType::Double, d @ Datum::F64(_)) => Ok(d),
        (FieldType::VarChar, Datum::Bytes(b)) => String::from_utf8(b)
            .map(Datum::String)
            .map_err(|_| CodecError::InvalidUtf8),
        (FieldType::Blob, d @ Datum::Bytes(_)) => Ok(d),
        (FieldType::Duration, d @ Datum::Duration(_)) => Ok(d),
        (FieldType::Duration, Datum::I64(ns)) => Ok(Datum::Duration(ns)),
        (_, d) => Err(mismatch(&d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_two_int_columns() {
        let data = encode_values(&[Datum::I64(1), Datum::I64(2)]);
        let values = decode_values(&data, &[FieldType::Int, FieldType::Int]).unwrap();
        assert_eq!(values, vec![Datum::I64(1), Datum::I64(2)]);
    }

    #[test]
    fn test_varchar_promoted_to_string() {
        let data = encode_values(&[Datum::Bytes(b"alice".to_vec()), Datum::Null]);
        let values = decode_values(&data, &[FieldType::VarChar, FieldType::Int]).unwrap();
        assert_eq!(values[0].as_str(), Some("alice"));
        assert!(values[1].is_null());
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let data = encode_values(&[Datum::Bytes(vec![0xff, 0xfe])]);
        assert_eq!(
            decode_values(&data, &[FieldType::VarChar]).unwrap_err(),
            CodecError::InvalidUtf8
        );
    }

    #[test]
    fn test_column_count_mismatch() {
        let data = encode_values(&[Datum::I64(1)]);
        assert_eq!(
            decode_values(&data, &[FieldType::Int, FieldType::Int]).unwrap_err(),
            CodecError::ColumnCount { expected: 2, actual: 1 }
        );
    }

    #[test]
    fn test_type_mismatch_names_column() {
        let data = encode_values(&[Datum::I64(1), Datum::F64(1.0)]);
        let err = decode_values(&data, &[FieldType::Int, FieldType::Blob]).unwrap_err();
        assert_eq!(
            err,
            CodecError::TypeMismatch {
                column: 1,
                field: FieldType::Blob,
                datum: "f64"
            }
        );
    }

    #[test]
    fn test_unsigned_accepts_non_negative_varint() {
        let data = encode_values(&[Datum::I64(7)]);
        assert_eq!(
            decode_values(&data, &[FieldType::UnsignedInt]).unwrap(),
            vec![Datum::U64(7)]
        );
        let data = encode_values(&[Datum::I64(-7)]);
        assert!(decode_values(&data, &[FieldType::UnsignedInt]).is_err());
    }

    #[test]
    fn test_duration_from_int() {
        let data = encode_values(&[Datum::I64(1_500)]);
        assert_eq!(
            decode_values(&data, &[FieldType::Duration]).unwrap(),
            vec![Datum::Duration(1_500)]
        );
    }

    #[test]
    fn test_truncated_row() {
        let mut data = encode_values(&[Datum::Bytes(b"abcdef".to_vec())]);
        data.truncate(data.len() - 2);
        assert!(matches!(
            decode_values(&data, &[FieldType::Blob]),
            Err(CodecError::Truncated { .. })
        ));
    }
}
