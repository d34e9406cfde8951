use crate::application::tooling::{KarbonTools, KarbonTransport};

pub(crate) struct ServerState<T: KarbonTransport> {
    tools: KarbonTools<T>,
}

impl<T: KarbonTransport> ServerState<T> {
    pub(crate) fn new(tools: KarbonTools<T>) -> Self {
        Self { tools }
    }

    pub(crate) fn tools(&self) -> &KarbonTools<T> {
        &self.tools
    }
}
