pub mod blur_scorer;
pub mod eye_detector;
pub mod face_detector;
pub mod frame_source;
pub mod measurement;
pub mod measurement_source;
