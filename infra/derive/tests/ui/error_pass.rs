use agora_derive::agora_error;
use std::borrow::Cow;

#[agora_error]
pub enum StoreError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), StoreError> {
    let io: Result<(), std::io::Error> = Ok(());
    io.context("reading")?;
    Ok(())
}

fn main() {
    let _ = read();
}
