mod cancellation;
mod quote_store;
mod result_sink;
mod text_generator;

pub use cancellation::{CancellationToken, ICancellable};
pub use quote_store::IQuoteStore;
pub use result_sink::IResultSink;
pub use text_generator::ITextGenerator;
