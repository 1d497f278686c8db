//! Intent catalogs.
//!
//! Turns a validated [`CatalogConfig`] into a built `Dispatcher<String>`
//! whose handlers render each intent's response text.

pub mod response;

use std::collections::BTreeSet;

use crate::config::CatalogConfig;
use crate::dispatch::{DispatchResult, Dispatcher, Handler, Params};
use crate::pattern::Template;

pub use response::ResponseTemplate;

/// Register every intent in `config` and build the dispatcher.
pub fn build_dispatcher(config: &CatalogConfig) -> DispatchResult<Dispatcher<String>> {
    let mut dispatcher = Dispatcher::with_config(config.dispatcher.clone())?;
    let separator = config.dispatcher.separator.as_str();

    for intent in &config.intents {
        let mut accepts = BTreeSet::new();
        for raw in &intent.templates {
            let template = Template::parse(raw, separator)?;
            accepts.extend(template.variable_names().map(str::to_string));
        }
        let accepts: Vec<&str> = accepts.iter().map(String::as_str).collect();

        let response = ResponseTemplate::parse(&intent.response);
        let handler = Handler::new(intent.name.clone(), &accepts, move |params: &Params| {
            response.render(params)
        });

        for raw in &intent.templates {
            dispatcher.register(raw, handler.clone())?;
        }
    }

    dispatcher.build();
    tracing::info!(
        intents = config.intents.len(),
        templates = dispatcher.len(),
        max_depth = dispatcher.max_depth().unwrap_or(1),
        "Catalog loaded"
    );
    Ok(dispatcher)
}
