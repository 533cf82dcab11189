use growlog_codec::Delimiter;

use crate::checks::columns::has_duplicates;
use crate::checks::index::validate_range_consistency;
use crate::code::{ErrorCode, ValidationFailure};
use crate::error::GateError;
use crate::gate::Pipeline;
use crate::query::{FetchQuery, ReturnElements};
use crate::stage::StageDecision;

/// A fetch query under validation.
#[derive(Debug)]
pub struct FetchRequest<'a> {
    pub query: &'a FetchQuery,
    /// Mnemonics of the first row-data selector, or `None` when it has no
    /// mnemonic list. A blank list names no mnemonics.
    mnemonics: Option<Vec<&'a str>>,
}

impl<'a> FetchRequest<'a> {
    pub fn new(query: &'a FetchQuery) -> Self {
        let delimiter = Delimiter::or_default(query.data_delimiter.as_deref());
        let mnemonics = query
            .data
            .first()
            .and_then(|d| d.mnemonic_list.as_deref())
            .map(|list| match list {
                "" => Vec::new(),
                list => delimiter.split(list),
            });
        Self { query, mnemonics }
    }

    fn single_data_selector(&self) -> bool {
        self.query.data.len() == 1
    }

    fn mnemonics(&self) -> &[&'a str] {
        self.mnemonics.as_deref().unwrap_or_default()
    }
}

/// The fetch pipeline.
pub fn pipeline<'a>() -> Pipeline<FetchRequest<'a>> {
    Pipeline::<FetchRequest<'a>>::new()
        .stage("range_consistency", range_consistency)
        .stage("recurring_data", recurring_data)
        .stage("duplicate_mnemonics", duplicate_mnemonics)
        .stage("requested_columns", requested_columns)
}

fn range_consistency(req: &FetchRequest<'_>) -> Result<StageDecision, GateError> {
    Ok(validate_range_consistency(req.query.ranges()).into())
}

fn recurring_data(req: &FetchRequest<'_>) -> Result<StageDecision, GateError> {
    if req.query.data.len() > 1 {
        return Ok(StageDecision::Fail(ValidationFailure::new(
            ErrorCode::RecurringLogData,
            &["data"],
        )));
    }
    Ok(StageDecision::Pass)
}

fn duplicate_mnemonics(req: &FetchRequest<'_>) -> Result<StageDecision, GateError> {
    if req.single_data_selector() && has_duplicates(req.mnemonics().iter().copied()) {
        return Ok(StageDecision::Fail(ValidationFailure::new(
            ErrorCode::DuplicateMnemonics,
            &["data", "mnemonicList"],
        )));
    }
    Ok(StageDecision::Pass)
}

/// Under `Requested`, every column selector must name a mnemonic, and a single
/// row-data selector must carry a mnemonic list naming the same set of
/// mnemonics as the column selectors.
fn requested_columns(req: &FetchRequest<'_>) -> Result<StageDecision, GateError> {
    let query = req.query;
    if query.return_elements != ReturnElements::Requested {
        return Ok(StageDecision::Pass);
    }

    let selected = query.selected_mnemonics();
    if selected.len() != query.columns.len() {
        return Ok(StageDecision::Fail(ValidationFailure::new(
            ErrorCode::MissingMnemonicElement,
            &["columns", "mnemonic"],
        )));
    }

    if req.single_data_selector() {
        let listed = req.mnemonics();
        let same = selected.iter().all(|s| listed.contains(s))
            && listed.iter().all(|l| selected.contains(l));
        if !selected.is_empty() && !listed.is_empty() && !same {
            return Ok(StageDecision::Fail(ValidationFailure::new(
                ErrorCode::ColumnIdentifiersNotSame,
                &["data", "mnemonicList"],
            )));
        }
        if req.mnemonics.is_none() {
            return Ok(StageDecision::Fail(ValidationFailure::new(
                ErrorCode::MissingMnemonicList,
                &["data", "mnemonicList"],
            )));
        }
    }
    Ok(StageDecision::Pass)
}
