//! The boundary between the configuration engine and the toolpath pipeline stages.
//!
//! A stage ([`Operation`]) is first handed a read-only [`Configuration`]
//! through [`Operation::init`], and is then started with the downstream
//! [`DataSink`] it should emit to. Emitted [`DataEnvelope`]s are moved into the
//! sink, so the downstream stage owns them.

use std::path::PathBuf;

use bytes::Bytes;
use miette::Result;

use crate::configuration::Configuration;

mod model_reader;

pub use model_reader::ModelFileReaderOperation;


/// A model file, read into memory but not yet interpreted.
#[derive(Clone, PartialEq, Debug)]
pub struct ModelData {
    pub source_path: PathBuf,
    pub contents: Bytes,
}


#[derive(Clone, PartialEq, Debug)]
pub enum Payload {
    Model(ModelData),
}


/// A unit of data travelling from one pipeline stage to the next.
#[derive(Clone, PartialEq, Debug)]
pub struct DataEnvelope {
    pub payload: Payload,

    /// Set on the final envelope a stage emits for one invocation.
    pub last: bool,
}

impl DataEnvelope {
    pub fn new(payload: Payload, last: bool) -> Self {
        Self { payload, last }
    }
}


/// Receives the envelopes a pipeline stage emits.
pub trait DataSink {
    fn accept(&mut self, envelope: DataEnvelope) -> Result<()>;
}

/// Collects everything it receives, in order.
impl DataSink for Vec<DataEnvelope> {
    fn accept(&mut self, envelope: DataEnvelope) -> Result<()> {
        self.push(envelope);
        Ok(())
    }
}


/// A pipeline stage.
pub trait Operation<'c> {
    /// Hands the stage the configuration it should work with.
    /// Must be called before [`Operation::start`].
    fn init(&mut self, configuration: &'c Configuration);

    /// Runs the stage, emitting its output into `downstream`.
    fn start(&mut self, downstream: &mut dyn DataSink) -> Result<()>;
}
