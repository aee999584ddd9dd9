// Adapters layer: concrete renderings of the abstract response description
// for each host surface (plain text for the CLI, SSML and the request/response
// envelope for the voice platform).

pub mod alexa;
pub mod ssml;
pub mod text;
