use growlog_codec::Delimiter;
use growlog_store::{DataAdapter, StoreContext};
use growlog_types::{GrowingObject, ObjectType, ObjectUri};

use crate::checks::columns::{self, is_blank, MnemonicScope};
use crate::checks::index::{validate_range_consistency, RequestedRanges};
use crate::checks::rows::{validate_rows, RowCheck};
use crate::code::{ErrorCode, ValidationFailure};
use crate::config::GateConfig;
use crate::error::GateError;
use crate::gate::Pipeline;
use crate::stage::StageDecision;

/// A new growing object under validation, with the store it will join.
#[derive(Debug)]
pub struct InsertRequest<'a> {
    pub object: &'a GrowingObject,
    /// Whether the object is a log or a channel set.
    pub object_type: ObjectType,
    pub store: &'a StoreContext,
    pub config: &'a GateConfig,
}

impl InsertRequest<'_> {
    fn uid_well(&self) -> &str {
        self.object.uid_well.as_deref().unwrap_or_default()
    }

    fn uid_wellbore(&self) -> &str {
        self.object.uid_wellbore.as_deref().unwrap_or_default()
    }
}

fn fail(code: ErrorCode, fields: &[&str]) -> Result<StageDecision, GateError> {
    Ok(StageDecision::Fail(ValidationFailure::new(code, fields)))
}

/// The insert pipeline.
pub fn pipeline<'a>() -> Pipeline<InsertRequest<'a>> {
    Pipeline::<InsertRequest<'a>>::new()
        .stage("parent_uid", parent_uid)
        .stage("parent_well", parent_well)
        .stage("parent_wellbore", parent_wellbore)
        .stage("unique_uid", unique_uid)
        .stage("parameter_uids", parameter_uids)
        .stage("column_identifiers", column_identifiers)
        .stage("duplicate_columns", duplicate_columns)
        .stage("range_consistency", range_consistency)
        .stage("data_delimiter", data_delimiter)
        .stage("row_data", row_data)
}

fn parent_uid(req: &InsertRequest<'_>) -> Result<StageDecision, GateError> {
    if is_blank(req.object.uid_well.as_deref()) {
        return fail(ErrorCode::MissingParentUid, &["uidWell"]);
    }
    if is_blank(req.object.uid_wellbore.as_deref()) {
        return fail(ErrorCode::MissingParentUid, &["uidWellbore"]);
    }
    Ok(StageDecision::Pass)
}

fn parent_well(req: &InsertRequest<'_>) -> Result<StageDecision, GateError> {
    if !req.store.wells.exists(&ObjectUri::well(req.uid_well()))? {
        return fail(ErrorCode::MissingParentDataObject, &["uidWell"]);
    }
    Ok(StageDecision::Pass)
}

/// The wellbore must exist, and the object must name it and its well with the
/// exact stored casing.
fn parent_wellbore(req: &InsertRequest<'_>) -> Result<StageDecision, GateError> {
    let Some(wellbore) = req.store.wellbore(req.uid_well(), req.uid_wellbore())? else {
        return fail(ErrorCode::MissingParentDataObject, &["uidWellbore"]);
    };
    if wellbore.uid_well != req.uid_well() || wellbore.uid != req.uid_wellbore() {
        return fail(ErrorCode::IncorrectCaseParentUid, &["uidWellbore"]);
    }
    Ok(StageDecision::Pass)
}

fn unique_uid(req: &InsertRequest<'_>) -> Result<StageDecision, GateError> {
    let uri = ObjectUri::growing(
        req.object_type,
        req.uid_well(),
        req.uid_wellbore(),
        req.object.uid.as_deref().unwrap_or_default(),
    );
    if req.store.growing.exists(&uri)? {
        return fail(ErrorCode::DataObjectUidAlreadyExists, &["uid"]);
    }
    Ok(StageDecision::Pass)
}

fn parameter_uids(req: &InsertRequest<'_>) -> Result<StageDecision, GateError> {
    let parameters = req.object.parameters.iter().flatten();
    Ok(columns::validate_uid_presence(parameters.map(|p| p.uid.as_deref()), "parameters").into())
}

fn column_identifiers(req: &InsertRequest<'_>) -> Result<StageDecision, GateError> {
    let declared = req.object.columns.as_deref().unwrap_or_default();
    let mnemonics = columns::mnemonics_of(declared);
    Ok(columns::validate_mnemonic_charset(mnemonics, MnemonicScope::Columns).into())
}

fn duplicate_columns(req: &InsertRequest<'_>) -> Result<StageDecision, GateError> {
    let declared = req.object.columns.as_deref().unwrap_or_default();
    Ok(columns::validate_uniqueness(columns::mnemonics_of(declared), MnemonicScope::Columns).into())
}

fn range_consistency(req: &InsertRequest<'_>) -> Result<StageDecision, GateError> {
    Ok(validate_range_consistency(RequestedRanges::of(req.object)).into())
}

fn data_delimiter(req: &InsertRequest<'_>) -> Result<StageDecision, GateError> {
    if Delimiter::from_declared(req.object.data_delimiter.as_deref()).is_err() {
        return fail(ErrorCode::InvalidDataDelimiter, &["dataDelimiter"]);
    }
    Ok(StageDecision::Pass)
}

fn row_data(req: &InsertRequest<'_>) -> Result<StageDecision, GateError> {
    let object = req.object;
    let blocks = object.data_blocks();
    if blocks.is_empty() {
        return Ok(StageDecision::Pass);
    }
    let governing = object.mnemonics();
    let delimiter = Delimiter::or_default(object.data_delimiter.as_deref());
    let check = RowCheck {
        index_curve: object.index_curve.as_deref(),
        declared: object.columns.as_deref(),
        blocks,
        governing: &governing,
        delimiter: &delimiter,
        insert: true,
    };
    Ok(validate_rows(&check, req.config).into())
}
