//! Writing version messages to the CI log stream.
//!
//! CI systems pick service messages up from the build's standard output.
//! [`VersionOutput`] runs an agent's integration and writes each message
//! on its own line. Empty messages mean "nothing to report" and produce
//! no output at all.

use std::io::Write;

use crate::agents::BuildAgent;
use crate::error::Result;
use crate::variables::VersionVariables;

/// Writes an agent's version messages to a stream.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use buildagent::agents::TeamCity;
/// use buildagent::environment::MemoryEnvironment;
/// use buildagent::{VersionOutput, VersionVariables};
///
/// let agent = TeamCity::new(Arc::new(MemoryEnvironment::new()));
/// let vars = VersionVariables::from_version("1.0.0");
///
/// let mut output = VersionOutput::new(Vec::new());
/// output.write_set_version(&agent, &vars).unwrap();
/// assert_eq!(output.into_inner(), b"##teamcity[buildNumber '1.0.0']\n");
/// ```
#[derive(Debug)]
pub struct VersionOutput<W: Write> {
    writer: W,
    lines_written: usize,
}

impl<W: Write> VersionOutput<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines_written: 0,
        }
    }

    /// Number of lines written so far.
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write one message. Empty messages are dropped.
    pub fn write_line(&mut self, message: &str) -> Result<()> {
        if message.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", message)?;
        self.lines_written += 1;
        Ok(())
    }

    /// Write only the set-version message.
    pub fn write_set_version(
        &mut self,
        agent: &dyn BuildAgent,
        variables: &VersionVariables,
    ) -> Result<()> {
        let message = agent.set_version_message(variables);
        self.write_line(&message)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Run the agent's full integration.
    ///
    /// Messages are collected first and then written, so a failing
    /// integration writes nothing to the stream.
    pub fn write_integration(
        &mut self,
        agent: &dyn BuildAgent,
        variables: &VersionVariables,
        update_build_number: bool,
    ) -> Result<()> {
        let mut messages = Vec::new();
        agent.write_integration(
            variables,
            &mut |message| messages.push(message.to_string()),
            update_build_number,
        )?;

        for message in &messages {
            self.write_line(message)?;
        }
        self.writer.flush()?;

        tracing::debug!(
            "Wrote {} message(s) for build agent '{}'",
            messages.len(),
            agent.name()
        );
        Ok(())
    }
}
