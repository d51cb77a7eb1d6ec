//! Answering autocomplete interactions.

use std::sync::Arc;
use tracing::debug;

use crate::{
    commands::{
        callback::Completion,
        command::ApplicationCommand,
        option::{CommandChoice, CommandOption},
        process::Scope,
    },
    error::{PayloadIntegrityError, Result},
    types::interaction::{Interaction, InteractionOption},
};

/// The most choices Discord accepts in one autocomplete response.
pub const MAX_CHOICES: usize = 25;

/// Choices whose value contains `partial`, ignoring case.
pub fn filter_choices(choices: &[CommandChoice], partial: &str) -> Vec<CommandChoice> {
    let needle = partial.to_lowercase();
    choices
        .iter()
        .filter(|choice| choice.value.to_string().to_lowercase().contains(&needle))
        .take(MAX_CHOICES)
        .cloned()
        .collect()
}

/// Find the focused option of an autocomplete interaction, descending into
/// sub-commands, along with its declaration.
fn focused<'a>(
    mut scope: Scope<'a>,
    nodes: &'a [InteractionOption],
) -> Result<(&'a CommandOption, &'a InteractionOption), PayloadIntegrityError> {
    let mut nodes = nodes;
    loop {
        if let Some(node) = nodes.iter().find(|node| node.focused) {
            return Ok((scope.declared(&node.name)?, node));
        }

        let Some(sub) = nodes.iter().find(|node| node.kind.is_sub_command()) else {
            return Err(PayloadIntegrityError::NoFocusedOption);
        };
        scope = Scope::option(scope.sub_command(&sub.name)?);
        nodes = &sub.options;
    }
}

/// Suggest choices for the focused option and send them back.
pub(crate) async fn autocomplete(
    command: &ApplicationCommand,
    interaction: Arc<Interaction>,
) -> Result<()> {
    let data = interaction.data()?;
    let (option, node) = focused(Scope::command(command), &data.options)?;
    let partial = match &node.value {
        Some(serde_json::Value::String(partial)) => partial.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    let mut choices = match option.custom_completer() {
        Some(completer) => {
            completer(Completion {
                interaction: Arc::clone(&interaction),
                option: option.label().to_owned(),
                choices: option.declared_choices().to_vec(),
                value: partial.clone(),
            })
            .await?
        }
        None => filter_choices(option.declared_choices(), &partial),
    };
    choices.truncate(MAX_CHOICES);

    debug!(
        command = %command.name,
        option = option.label(),
        count = choices.len(),
        "answering autocomplete"
    );
    interaction.autocomplete(choices).await
}
