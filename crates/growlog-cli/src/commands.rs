use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use growlog_codec::{decode_data_block, rows_follow_direction, ChannelSetData, Delimiter, Table};
use growlog_gate::{FetchQuery, GateConfig, ValidationFailure, ValidatorRegistry};
use growlog_store::{StoreContext, StoreFixture};
use growlog_types::{Column, GrowingObject, ObjectType};
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Validate(args) => cmd_validate(&args, cli.format),
        Command::Codec(args) => cmd_codec(args.action, cli.format),
    }
}

fn cmd_validate(args: &ValidateArgs, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let failure = validate(args)?;
    match format {
        OutputFormat::Json => {
            let report = match &failure {
                None => json!({ "accepted": true }),
                Some(f) => json!({ "accepted": false, "code": f.code, "fields": f.fields }),
            };
            println!("{report}");
        }
        OutputFormat::Text => match &failure {
            None => println!("{} Request accepted", "✓".green().bold()),
            Some(f) => {
                println!("{} Request rejected: {}", "✗".red().bold(), f.code.as_str().yellow());
                for field in &f.fields {
                    println!("  Field: {}", field.cyan());
                }
            }
        },
    }
    Ok(if failure.is_none() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run one request through the registry and return its rejection, if any.
pub(crate) fn validate(args: &ValidateArgs) -> anyhow::Result<Option<ValidationFailure>> {
    let config = match &args.config {
        Some(path) => GateConfig::from_toml_file(path)?,
        None => GateConfig::default(),
    };
    let store = match &args.store {
        Some(path) => StoreContext::from_fixture(
            StoreFixture::load(path)
                .with_context(|| format!("loading store fixture {}", path.display()))?,
        )?,
        None => StoreContext::in_memory(),
    };
    let object_type: ObjectType = args.object_type.parse()?;
    let registry = ValidatorRegistry::with_defaults(config);
    let request = read(&args.request)?;

    tracing::debug!(operation = ?args.operation, %object_type, "validating request");
    let failure = match args.operation {
        Operation::Get => {
            let query: FetchQuery =
                serde_json::from_str(&request).context("parsing fetch query")?;
            registry.validate_for_get(object_type, &query)?
        }
        Operation::Insert => {
            let mut object: GrowingObject =
                serde_json::from_str(&request).context("parsing growing object")?;
            registry.validate_for_insert(object_type, &mut object, &store)?
        }
        Operation::Update => {
            let object: GrowingObject =
                serde_json::from_str(&request).context("parsing growing object")?;
            registry.validate_for_update(object_type, &object, &store)?
        }
    };
    Ok(failure)
}

fn cmd_codec(action: CodecAction, format: OutputFormat) -> anyhow::Result<ExitCode> {
    match action {
        CodecAction::Split { text, delimiter } => {
            let fields = split_fields(&text, &delimiter)?;
            match format {
                OutputFormat::Json => println!("{}", json!(fields)),
                OutputFormat::Text => {
                    for (i, field) in fields.iter().enumerate() {
                        println!("{:>4}  {}", i.to_string().dimmed(), field);
                    }
                }
            }
        }
        CodecAction::Decode { path } => {
            let object: GrowingObject = serde_json::from_str(&read(&path)?)
                .context("parsing growing object")?;
            let blocks = decode_object(&object)?;
            for (i, block) in blocks.iter().enumerate() {
                print_block(i, block, format);
            }
        }
        CodecAction::Channels { path, columns } => {
            let data = decode_channels(&path, columns.as_deref())?;
            match format {
                OutputFormat::Json => println!(
                    "{}",
                    json!({
                        "rows": data.rows.len(),
                        "indexes": data.index_count(),
                        "channels": data.channel_count(),
                    })
                ),
                OutputFormat::Text => {
                    println!(
                        "{} {} rows, {} indexes, {} channels",
                        "✓".green().bold(),
                        data.rows.len().to_string().bold(),
                        data.index_count(),
                        data.channel_count()
                    );
                    println!("{}", data.encode()?);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn split_fields(text: &str, delimiter: &str) -> anyhow::Result<Vec<String>> {
    let delimiter = Delimiter::parse(delimiter)?;
    Ok(delimiter.split(text).into_iter().map(str::to_string).collect())
}

/// Decode channel-set rows, checking point metadata when declarations are given.
pub(crate) fn decode_channels(
    path: &Path,
    columns: Option<&Path>,
) -> anyhow::Result<ChannelSetData> {
    let data = ChannelSetData::decode(&read(path)?)?;
    if let Some(columns) = columns {
        let channels: Vec<Column> =
            serde_json::from_str(&read(columns)?).context("parsing channel declarations")?;
        data.check_point_metadata(&channels)?;
    }
    Ok(data)
}

/// One decoded data block and whether its rows follow the object's direction.
pub(crate) struct DecodedBlock {
    pub table: Table,
    pub ordered: bool,
}

pub(crate) fn decode_object(object: &GrowingObject) -> anyhow::Result<Vec<DecodedBlock>> {
    let delimiter = Delimiter::from_declared(object.data_delimiter.as_deref())?;
    let kind = object.classify();
    let direction = object.direction_or_default();
    Ok(object
        .data_blocks()
        .iter()
        .map(|block| {
            let table = decode_data_block(block, &delimiter);
            let ordered = rows_follow_direction(&table, kind, direction);
            DecodedBlock { table, ordered }
        })
        .collect())
}

fn print_block(index: usize, block: &DecodedBlock, format: OutputFormat) {
    let table = &block.table;
    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "block": index,
                "mnemonics": table.mnemonics,
                "units": table.units,
                "rows": table.rows,
                "ordered": block.ordered,
            })
        ),
        OutputFormat::Text => {
            println!(
                "Block {}: {} rows, {} points",
                index.to_string().yellow().bold(),
                table.row_count(),
                table.point_count()
            );
            println!("  {}", table.mnemonics.join("\t").bold());
            println!("  {}", table.units.join("\t").dimmed());
            for row in &table.rows {
                println!("  {}", row.join("\t"));
            }
            let order = if block.ordered {
                "in index order".green()
            } else {
                "out of index order".red()
            };
            println!("  Rows {order}");
        }
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use growlog_gate::ErrorCode;
    use growlog_types::{DataBlock, PointMetadata, ValueType, Well, Wellbore};

    use super::*;

    fn log() -> GrowingObject {
        let mut log = GrowingObject::depth_log("w1", "b1", "l1", "MD");
        log.columns = Some(vec![
            Column::new("c0", "MD", Some("m")),
            Column::new("c1", "ROP", Some("m/h")),
        ]);
        log
    }

    fn write_json<T: serde::Serialize>(dir: &Path, name: &str, value: &T) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    fn store(dir: &Path, logs: Vec<GrowingObject>) -> PathBuf {
        let fixture = StoreFixture {
            wells: vec![Well::new("w1")],
            wellbores: vec![Wellbore::new("w1", "b1")],
            logs,
            ..Default::default()
        };
        let path = dir.join("store.json");
        fixture.save(&path).unwrap();
        path
    }

    fn args(request: PathBuf, store: Option<PathBuf>, operation: Operation) -> ValidateArgs {
        ValidateArgs {
            request,
            store,
            operation,
            object_type: "log".into(),
            config: None,
        }
    }

    #[test]
    fn insert_into_fixture_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let request = write_json(dir.path(), "log.json", &log());
        let store = store(dir.path(), vec![]);
        assert_eq!(validate(&args(request, Some(store), Operation::Insert)).unwrap(), None);
    }

    #[test]
    fn insert_without_parents_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let request = write_json(dir.path(), "log.json", &log());
        let failure = validate(&args(request, None, Operation::Insert)).unwrap().unwrap();
        assert_eq!(failure.code, ErrorCode::MissingParentDataObject);
        assert_eq!(failure.fields, vec!["uidWell"]);
    }

    #[test]
    fn update_of_stored_log_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path(), vec![log()]);
        let mut update = GrowingObject::depth_log("w1", "b1", "l1", "MD");
        update.index_curve = None;
        update.index_type = None;
        update.data = Some(vec![DataBlock::new("MD,ROP", "m,m/h", &["100,1.5"])]);
        let request = write_json(dir.path(), "update.json", &update);
        assert_eq!(validate(&args(request, Some(store), Operation::Update)).unwrap(), None);
    }

    #[test]
    fn fetch_with_duplicate_mnemonics_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let query: FetchQuery = serde_json::from_value(json!({
            "data": [{ "mnemonicList": "MD,ROP,MD" }]
        }))
        .unwrap();
        let request = write_json(dir.path(), "query.json", &query);
        let failure = validate(&args(request, None, Operation::Get)).unwrap().unwrap();
        assert_eq!(failure.code, ErrorCode::DuplicateMnemonics);
    }

    #[test]
    fn config_file_limits_apply() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("gate.toml");
        std::fs::write(&config, "max_data_nodes = 1\n").unwrap();
        let store = store(dir.path(), vec![]);
        let mut object = log();
        object.data = Some(vec![DataBlock::new("MD,ROP", "m,m/h", &["1,2", "2,3"])]);
        let request = write_json(dir.path(), "log.json", &object);
        let mut args = args(request, Some(store), Operation::Insert);
        args.config = Some(config);
        let failure = validate(&args).unwrap().unwrap();
        assert_eq!(failure.code, ErrorCode::MaxDataExceeded);
    }

    #[test]
    fn unknown_object_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let request = write_json(dir.path(), "log.json", &log());
        let mut args = args(request, None, Operation::Insert);
        args.object_type = "trajectory".into();
        assert!(validate(&args).is_err());
    }

    #[test]
    fn missing_request_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate(&args(dir.path().join("nope.json"), None, Operation::Insert))
            .unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn split_with_custom_delimiter() {
        assert_eq!(split_fields("a|b||c", "|").unwrap(), vec!["a", "b", "", "c"]);
        assert!(split_fields("a b", " ").is_err());
    }

    #[test]
    fn decode_reports_ordering() {
        let mut object = log();
        object.data_delimiter = Some("|".into());
        object.data = Some(vec![
            DataBlock::new("MD|ROP", "m|m/h", &["100|1", "101|2"]),
            DataBlock::new("MD|ROP", "m|m/h", &["101|1", "100|2"]),
        ]);
        let blocks = decode_object(&object).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].table.mnemonics, vec!["MD", "ROP"]);
        assert!(blocks[0].ordered);
        assert!(!blocks[1].ordered);
    }

    #[test]
    fn channels_checked_against_declarations() {
        let dir = tempfile::tempdir().unwrap();
        let rows = dir.path().join("rows.json");
        std::fs::write(&rows, "[[[100.0],[[12.5,true],250.0]],[[101.0],[13.0,null]]]").unwrap();
        let confidence = PointMetadata {
            name: "confidence".into(),
            description: None,
            value_type: ValueType::Boolean,
        };
        let channels = vec![
            Column::new("c1", "ROP", Some("m/h")).with_point_metadata(confidence),
            Column::new("c2", "HKLD", Some("klbf")),
        ];
        let columns = write_json(dir.path(), "columns.json", &channels);

        assert_eq!(decode_channels(&rows, None).unwrap().rows.len(), 2);
        let err = decode_channels(&rows, Some(&columns)).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}
