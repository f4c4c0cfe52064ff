// SPDX-License-Identifier: MPL-2.0
//! Generic filter-editing drawer.
//!
//! The drawer owns in-progress row edits and validates them itself: the
//! apply effect fires exactly once per confirmation and only ever carries a
//! complete, well-formed [`FilterState`]. Partially-edited rows keep the
//! drawer open with a validation hint instead of leaking out.

use crate::filters::{FilterCriterion, FilterOperator, FilterState, FilterValue};
use iced::widget::{button, pick_list, text_input, Column, Row, Text};
use iced::{Element, Length};

/// One criterion row being edited.
#[derive(Debug, Clone, Default)]
pub struct RowEdit {
    pub field: String,
    pub operator: Option<FilterOperator>,
    pub value: String,
}

impl RowEdit {
    fn is_blank(&self) -> bool {
        self.field.trim().is_empty() && self.value.trim().is_empty()
    }

    /// Builds a criterion from a completed row. `None` while the row is
    /// incomplete (missing field, operator, or value).
    fn to_criterion(&self) -> Option<FilterCriterion> {
        let field = self.field.trim();
        let operator = self.operator?;
        let value = self.value.trim();
        if field.is_empty() || value.is_empty() {
            return None;
        }

        let value = if operator.takes_list() {
            FilterValue::List(
                value
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect(),
            )
        } else {
            FilterValue::Scalar(value.to_string())
        };

        Some(FilterCriterion {
            field: field.to_string(),
            operator,
            value,
        })
    }
}

fn row_from_criterion(criterion: &FilterCriterion) -> RowEdit {
    RowEdit {
        field: criterion.field.clone(),
        operator: Some(criterion.operator),
        value: criterion.value.display(),
    }
}

/// Drawer state: open flag, the rows under edit, and the provenance of the
/// prefill (cleared on the first edit so ad-hoc changes shed the saved name).
#[derive(Debug, Clone, Default)]
pub struct State {
    open: bool,
    rows: Vec<RowEdit>,
    prefill_name: Option<String>,
    prefill_id: Option<String>,
    validation_hint: Option<String>,
}

/// Messages for the drawer.
#[derive(Debug, Clone)]
pub enum Message {
    /// Open the drawer prefilled from the given state.
    Open(FilterState),
    Close,
    FieldChanged { row: usize, field: String },
    OperatorSelected { row: usize, operator: FilterOperator },
    ValueChanged { row: usize, value: String },
    AddRow,
    RemoveRow(usize),
    /// User confirmed the current edits.
    Confirm,
}

/// Effects propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// The user confirmed a valid filter state. Fired once per confirmation.
    Apply(FilterState),
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn validation_hint(&self) -> Option<&str> {
        self.validation_hint.as_deref()
    }

    /// Closes the drawer and drops in-progress edits.
    pub fn close(&mut self) {
        self.open = false;
        self.rows.clear();
        self.prefill_name = None;
        self.prefill_id = None;
        self.validation_hint = None;
    }

    fn mark_edited(&mut self) {
        self.prefill_name = None;
        self.prefill_id = None;
        self.validation_hint = None;
    }

    /// Handle a drawer message.
    ///
    /// Note: Takes `Message` by value following Iced's `update(message: Message)` pattern.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Open(state) => {
                self.open = true;
                self.rows = state.criteria.iter().map(row_from_criterion).collect();
                if self.rows.is_empty() {
                    self.rows.push(RowEdit::default());
                }
                self.prefill_name = state.applied_filter_name;
                self.prefill_id = state.selected_saved_filter_id;
                self.validation_hint = None;
                Effect::None
            }
            Message::Close => {
                self.close();
                Effect::None
            }
            Message::FieldChanged { row, field } => {
                if let Some(edit) = self.rows.get_mut(row) {
                    edit.field = field;
                    self.mark_edited();
                }
                Effect::None
            }
            Message::OperatorSelected { row, operator } => {
                if let Some(edit) = self.rows.get_mut(row) {
                    edit.operator = Some(operator);
                    self.mark_edited();
                }
                Effect::None
            }
            Message::ValueChanged { row, value } => {
                if let Some(edit) = self.rows.get_mut(row) {
                    edit.value = value;
                    self.mark_edited();
                }
                Effect::None
            }
            Message::AddRow => {
                self.rows.push(RowEdit::default());
                self.validation_hint = None;
                Effect::None
            }
            Message::RemoveRow(row) => {
                if row < self.rows.len() {
                    self.rows.remove(row);
                    self.mark_edited();
                }
                Effect::None
            }
            Message::Confirm => match self.confirmed_state() {
                Some(state) => Effect::Apply(state),
                None => {
                    self.validation_hint =
                        Some("Every criterion needs a field, an operator, and a value".to_string());
                    Effect::None
                }
            },
        }
    }

    /// Builds the filter state the confirmation would emit, or `None` when a
    /// partially-edited row blocks it. Rows left entirely blank are dropped.
    fn confirmed_state(&self) -> Option<FilterState> {
        let mut criteria = Vec::new();
        for row in self.rows.iter().filter(|row| !row.is_blank()) {
            criteria.push(row.to_criterion()?);
        }

        Some(FilterState {
            criteria,
            applied_filter_name: self.prefill_name.clone(),
            selected_saved_filter_id: self.prefill_id.clone(),
        })
    }

    /// Renders the drawer contents. `confirm_enabled` is false while an
    /// update is in flight so a second confirmation cannot be issued.
    pub fn view(&self, confirm_enabled: bool) -> Element<'_, Message> {
        let mut rows = Column::new().spacing(8);

        for (index, edit) in self.rows.iter().enumerate() {
            let field_input = text_input("field", &edit.field)
                .on_input(move |field| Message::FieldChanged { row: index, field })
                .width(Length::FillPortion(2));

            let operator_picker = pick_list(
                FilterOperator::ALL,
                edit.operator,
                move |operator| Message::OperatorSelected {
                    row: index,
                    operator,
                },
            );

            let value_input = text_input("value", &edit.value)
                .on_input(move |value| Message::ValueChanged { row: index, value })
                .width(Length::FillPortion(3));

            let remove = button(Text::new("Remove"))
                .on_press(Message::RemoveRow(index))
                .style(button::danger);

            rows = rows.push(
                Row::new()
                    .spacing(8)
                    .push(field_input)
                    .push(operator_picker)
                    .push(value_input)
                    .push(remove),
            );
        }

        let mut confirm = button(Text::new("Apply filters"));
        if confirm_enabled {
            confirm = confirm.on_press(Message::Confirm);
        }

        let actions = Row::new()
            .spacing(8)
            .push(button(Text::new("Add criterion")).on_press(Message::AddRow))
            .push(confirm)
            .push(
                button(Text::new("Cancel"))
                    .on_press(Message::Close)
                    .style(button::secondary),
            );

        let mut drawer = Column::new().spacing(12).push(rows).push(actions);

        if let Some(hint) = &self.validation_hint {
            drawer = drawer.push(Text::new(hint.clone()));
        }

        drawer.into()
    }
}
