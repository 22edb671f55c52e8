use super::measurement::{AcquisitionError, Measurement};

/// Pull-based, effectively endless stream of per-frame measurements.
///
/// An `Err` item is a frame that could not be measured; the stream itself
/// continues. Restarting means building a new source.
pub trait MeasurementSource: Send {
    fn measurements(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Measurement, AcquisitionError>> + '_>;
}
