#[cfg(test)]
mod tests {
    use sqlh::{
        Complex32, Complex64, Direction, Entity, Row, Selectable, SqlhError, Value, apply_args,
        resolve_fields, scan_into, to_args,
    };
    use time::{PrimitiveDateTime, macros::datetime};

    #[derive(Entity, Clone, Debug, PartialEq)]
    struct Sample {
        #[sqlh(key = "primary key autoincrement")]
        id: i64,
        text: String,
        flag: bool,
        ratio: f32,
        precise: f64,
        tiny: i8,
        small: i16,
        medium: i32,
        byte: u8,
        word: u16,
        double_word: u32,
        quad_word: u64,
        bytes: Vec<u8>,
        created: PrimitiveDateTime,
        signal: Complex64,
        phase: Complex32,
        nickname: Option<String>,
        #[sqlh(name = "-")]
        scratch: i32,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                id: 0,
                text: String::new(),
                flag: false,
                ratio: 0.0,
                precise: 0.0,
                tiny: 0,
                small: 0,
                medium: 0,
                byte: 0,
                word: 0,
                double_word: 0,
                quad_word: 0,
                bytes: Vec::new(),
                created: sqlh::ZERO_TIMESTAMP,
                signal: Complex64::default(),
                phase: Complex32::default(),
                nickname: None,
                scratch: 0,
            }
        }
    }

    fn sample() -> Sample {
        Sample {
            id: 42,
            text: "hello".into(),
            flag: true,
            ratio: 0.5,
            precise: -1.25e10,
            tiny: -8,
            small: 1_000,
            medium: -70_000,
            byte: 200,
            word: 60_000,
            double_word: 4_000_000_000,
            quad_word: 1 << 40,
            bytes: vec![0, 1, 2, 255],
            created: datetime!(2024-05-17 08:30:00),
            signal: Complex64::new(1.5, -2.5),
            phase: Complex32::new(0.25, 4.0),
            nickname: Some("hal".into()),
            scratch: 7,
        }
    }

    #[test]
    fn round_trip() {
        let original = sample();
        let mut decoded = Sample::default();
        let mut slots = decoded.slots();
        scan_into(&mut slots, to_args(&original, Direction::Read)).unwrap();
        apply_args(&mut decoded, slots).unwrap();
        assert_eq!(decoded.scratch, 0);
        decoded.scratch = original.scratch;
        assert_eq!(decoded, original);
    }

    #[test]
    fn round_trip_through_storage_values() {
        // What a sqlite like store returns: 64 bit integers, doubles, text and blobs.
        let original = sample();
        let stored: Row = to_args(&original, Direction::Read)
            .into_iter()
            .map(|v| match v {
                Value::Boolean(Some(v)) => Value::Int64(Some(v as i64)),
                Value::Float32(Some(v)) => Value::Float64(Some(v as f64)),
                Value::Timestamp(Some(v)) => Value::Varchar(Some(sqlh::format_timestamp(&v))),
                v => match v.as_integer() {
                    Some(i) => Value::Int64(Some(i as i64)),
                    None => v,
                },
            })
            .collect();
        let mut decoded = Sample::default();
        decoded.apply_args(stored).unwrap();
        decoded.scratch = original.scratch;
        assert_eq!(decoded, original);
    }

    #[test]
    fn write_excludes_auto_increment() {
        let args = sample().to_args(Direction::Write);
        assert_eq!(args.len(), resolve_fields::<Sample>(false).len());
        assert_eq!(args.len(), Sample::slot_count() - 1);
        assert_eq!(args[0], Value::Varchar(Some("hello".into())));
        assert!(!args.contains(&Value::Int64(Some(42))));
    }

    #[test]
    fn ordering_matches_columns() {
        let record = sample();
        let read = record.to_args(Direction::Read);
        let columns = resolve_fields::<Sample>(true);
        assert_eq!(read.len(), columns.len());
        for (column, value) in columns.iter().zip(&read) {
            assert!(
                column.value.same_type(value),
                "column `{}` got {:?}",
                column.name,
                value
            );
        }
        let write = record.to_args(Direction::Write);
        let columns = resolve_fields::<Sample>(false);
        assert_eq!(columns[0].name, "text");
        for (column, value) in columns.iter().zip(&write) {
            assert!(column.value.same_type(value));
        }
    }

    #[test]
    fn null_zeroes_the_field() {
        let mut record = sample();
        let row = vec![Value::Null; Sample::slot_count()];
        record.apply_args(row).unwrap();
        let mut expected = Sample::default();
        expected.scratch = record.scratch;
        assert_eq!(record, expected);
    }

    #[test]
    fn unexpected_type_fails() {
        let mut record = Sample::default();
        let mut row = sample().slots();
        row[1] = Value::Float64(Some(3.0));
        let error = record.apply_args(row).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<SqlhError>(),
            Some(SqlhError::FieldTypeMismatch { .. })
        ));
        assert!(format!("{:#}", error).contains("`text`"));
    }

    #[test]
    fn blob_coercions() {
        #[derive(Entity, Default, Clone, Debug, PartialEq)]
        struct Blobs {
            text: String,
            raw: Box<[u8]>,
            signal: Complex64,
        }
        let mut record = Blobs::default();
        record
            .apply_args(vec![
                Value::Blob(Some(b"from bytes".as_slice().into())),
                Value::Varchar(Some("from text".into())),
                Value::Blob(Some(Complex64::new(2.0, 3.0).to_bytes().into())),
            ])
            .unwrap();
        assert_eq!(record.text, "from bytes");
        assert_eq!(&*record.raw, b"from text");
        assert_eq!(record.signal, Complex64::new(2.0, 3.0));

        let error = record
            .apply_args(vec![
                Value::Null,
                Value::Null,
                Value::Blob(Some([1u8, 2, 3].as_slice().into())),
            ])
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<SqlhError>(),
            Some(SqlhError::FieldTypeMismatch { .. })
        ));
    }

    #[test]
    fn column_count_mismatch() {
        let mut record = Sample::default();
        let error = record.apply_args(vec![Value::Null; 3]).unwrap_err();
        assert_eq!(
            error.downcast_ref::<SqlhError>(),
            Some(&SqlhError::ColumnCountMismatch {
                expected: Sample::slot_count(),
                found: 3
            })
        );
    }

    #[test]
    fn bool_from_integer() {
        #[derive(Entity, Default, Clone)]
        struct Flags {
            a: bool,
            b: bool,
            c: Option<bool>,
        }
        let mut record = Flags::default();
        record
            .apply_args(vec![
                Value::Int64(Some(1)),
                Value::Int64(Some(2)),
                Value::Int64(None),
            ])
            .unwrap();
        assert!(record.a);
        assert!(!record.b);
        assert_eq!(record.c, None);
    }
}
