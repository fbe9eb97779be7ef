/// Autocomplete suggestions for the `tally` option.
pub mod autocomplete_service;
/// `/tally` command dispatcher.
pub mod command_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Reply templates for the chat commands.
pub mod replies;
/// Read-only projections of the tally store.
pub mod tally_service;
