use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use bytes::Bytes;
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::{info, trace};

use super::{DataEnvelope, DataSink, ModelData, Operation, Payload};
use crate::configuration::Configuration;


/// The first pipeline stage: reads one model file and emits it,
/// as a single final envelope, to the next stage.
///
/// The file contents are passed on as raw bytes; interpreting the
/// mesh is up to the downstream stage.
#[derive(Debug)]
pub struct ModelFileReaderOperation<'c> {
    model_file_path: PathBuf,

    configuration: Option<&'c Configuration>,
}

impl<'c> ModelFileReaderOperation<'c> {
    pub fn new<P: Into<PathBuf>>(model_file_path: P) -> Self {
        Self {
            model_file_path: model_file_path.into(),
            configuration: None,
        }
    }

    pub fn model_file_path(&self) -> &Path {
        &self.model_file_path
    }

    fn read_model_file(&self) -> Result<ModelData> {
        let time_before_file_read = Instant::now();

        let contents = {
            let bytes_vec = std::fs::read(&self.model_file_path)
                .into_diagnostic()
                .wrap_err_with(|| {
                    miette!(
                        "Failed to read model file {}.",
                        self.model_file_path.display()
                    )
                })?;

            Bytes::from(bytes_vec)
        };

        if contents.is_empty() {
            return Err(miette!(
                "Invalid model file {}: file is empty.",
                self.model_file_path.display()
            ));
        }

        trace!(
            "Reading the model file took {} milliseconds.",
            time_before_file_read.elapsed().as_secs_f64() * 1000f64
        );

        Ok(ModelData {
            source_path: self.model_file_path.clone(),
            contents,
        })
    }
}

impl<'c> Operation<'c> for ModelFileReaderOperation<'c> {
    fn init(&mut self, configuration: &'c Configuration) {
        self.configuration = Some(configuration);
    }

    fn start(&mut self, downstream: &mut dyn DataSink) -> Result<()> {
        let configuration = self.configuration.ok_or_else(|| {
            miette!("ModelFileReaderOperation was started before being initialized.")
        })?;

        info!(
            "Reading model file {} (configuration: {}).",
            self.model_file_path.display(),
            configuration.file_path.display()
        );

        let model_data = self.read_model_file()?;

        downstream
            .accept(DataEnvelope::new(Payload::Model(model_data), true))
            .wrap_err("Downstream stage rejected the model data.")
    }
}
