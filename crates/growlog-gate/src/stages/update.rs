use std::cell::OnceCell;

use growlog_codec::Delimiter;
use growlog_store::StoreContext;
use growlog_types::{GrowingObject, ObjectType, ObjectUri};

use crate::checks::columns::{self, is_blank, MnemonicScope};
use crate::checks::merge::{merged_columns, merged_mnemonics, validate_column_changes};
use crate::checks::rows::{validate_rows, RowCheck};
use crate::code::{ErrorCode, ValidationFailure};
use crate::config::GateConfig;
use crate::error::GateError;
use crate::gate::Pipeline;
use crate::stage::StageDecision;

/// A partial revision of a stored growing object under validation.
///
/// The stored revision is fetched once, by the first stage that needs it.
#[derive(Debug)]
pub struct UpdateRequest<'a> {
    pub object: &'a GrowingObject,
    /// Whether the object is a log or a channel set.
    pub object_type: ObjectType,
    pub store: &'a StoreContext,
    pub config: &'a GateConfig,
    current: OnceCell<Option<GrowingObject>>,
}

impl<'a> UpdateRequest<'a> {
    pub fn new(
        object: &'a GrowingObject,
        object_type: ObjectType,
        store: &'a StoreContext,
        config: &'a GateConfig,
    ) -> Self {
        Self {
            object,
            object_type,
            store,
            config,
            current: OnceCell::new(),
        }
    }

    fn uri(&self) -> ObjectUri {
        ObjectUri::growing(
            self.object_type,
            self.object.uid_well.as_deref().unwrap_or_default(),
            self.object.uid_wellbore.as_deref().unwrap_or_default(),
            self.object.uid.as_deref().unwrap_or_default(),
        )
    }

    /// The stored revision of the object, if it exists.
    pub fn current(&self) -> Result<Option<&GrowingObject>, GateError> {
        if let Some(current) = self.current.get() {
            return Ok(current.as_ref());
        }
        let fetched = self.store.growing(&self.uri())?;
        Ok(self.current.get_or_init(|| fetched).as_ref())
    }
}

fn fail(code: ErrorCode, fields: &[&str]) -> Result<StageDecision, GateError> {
    Ok(StageDecision::Fail(ValidationFailure::new(code, fields)))
}

fn not_exist() -> Result<StageDecision, GateError> {
    fail(ErrorCode::DataObjectNotExist, &["uid", "uidWell", "uidWellbore"])
}

/// The update pipeline.
pub fn pipeline<'a>() -> Pipeline<UpdateRequest<'a>> {
    Pipeline::<UpdateRequest<'a>>::new()
        .stage("object_identity", object_identity)
        .stage("object_exists", object_exists)
        .stage("column_uids", column_uids)
        .stage("parameter_uids", parameter_uids)
        .stage("unique_column_uids", unique_column_uids)
        .stage("unique_parameter_uids", unique_parameter_uids)
        .stage("duplicate_columns", duplicate_columns)
        .stage("data_delimiter", data_delimiter)
        .stage("column_changes", column_changes)
        .stage("row_data", row_data)
}

fn object_identity(req: &UpdateRequest<'_>) -> Result<StageDecision, GateError> {
    let object = req.object;
    if is_blank(object.uid_well.as_deref())
        || is_blank(object.uid_wellbore.as_deref())
        || is_blank(object.uid.as_deref())
    {
        return fail(ErrorCode::DataObjectUidMissing, &["uid", "uidWell", "uidWellbore"]);
    }
    Ok(StageDecision::Pass)
}

fn object_exists(req: &UpdateRequest<'_>) -> Result<StageDecision, GateError> {
    if req.current()?.is_none() {
        return not_exist();
    }
    Ok(StageDecision::Pass)
}

fn column_uids(req: &UpdateRequest<'_>) -> Result<StageDecision, GateError> {
    let incoming = req.object.columns.as_deref().unwrap_or_default();
    Ok(columns::validate_uid_presence(columns::uids_of(incoming), "columns").into())
}

fn parameter_uids(req: &UpdateRequest<'_>) -> Result<StageDecision, GateError> {
    let parameters = req.object.parameters.iter().flatten();
    Ok(columns::validate_uid_presence(parameters.map(|p| p.uid.as_deref()), "parameters").into())
}

fn unique_column_uids(req: &UpdateRequest<'_>) -> Result<StageDecision, GateError> {
    let incoming = req.object.columns.as_deref().unwrap_or_default();
    Ok(columns::validate_uid_uniqueness(columns::uids_of(incoming), "columns").into())
}

fn unique_parameter_uids(req: &UpdateRequest<'_>) -> Result<StageDecision, GateError> {
    let parameters = req.object.parameters.iter().flatten();
    Ok(columns::validate_uid_uniqueness(parameters.map(|p| p.uid.as_deref()), "parameters").into())
}

fn duplicate_columns(req: &UpdateRequest<'_>) -> Result<StageDecision, GateError> {
    let incoming = req.object.columns.as_deref().unwrap_or_default();
    Ok(columns::validate_uniqueness(columns::mnemonics_of(incoming), MnemonicScope::Columns).into())
}

fn data_delimiter(req: &UpdateRequest<'_>) -> Result<StageDecision, GateError> {
    if Delimiter::from_declared(req.object.data_delimiter.as_deref()).is_err() {
        return fail(ErrorCode::InvalidDataDelimiter, &["dataDelimiter"]);
    }
    Ok(StageDecision::Pass)
}

/// Incoming columns may add curves or update existing ones, never both.
fn column_changes(req: &UpdateRequest<'_>) -> Result<StageDecision, GateError> {
    let Some(incoming) = req.object.columns.as_deref() else {
        return Ok(StageDecision::Pass);
    };
    let Some(current) = req.current()? else {
        return not_exist();
    };
    Ok(validate_column_changes(current, incoming).into())
}

/// Row data is checked against the stored index curve and delimiter, and may
/// reference any stored or incoming mnemonic. Unit checks use the stored
/// column metadata with incoming columns applied over it.
fn row_data(req: &UpdateRequest<'_>) -> Result<StageDecision, GateError> {
    let blocks = req.object.data_blocks();
    if blocks.is_empty() {
        return Ok(StageDecision::Pass);
    }
    let Some(current) = req.current()? else {
        return not_exist();
    };
    let incoming = req.object.columns.as_deref();
    let governing = merged_mnemonics(current, incoming);
    let columns = merged_columns(current, incoming);
    let delimiter = Delimiter::or_default(current.data_delimiter.as_deref());
    let check = RowCheck {
        index_curve: current.index_curve.as_deref(),
        declared: Some(columns.as_slice()),
        blocks,
        governing: &governing,
        delimiter: &delimiter,
        insert: false,
    };
    Ok(validate_rows(&check, req.config).into())
}
