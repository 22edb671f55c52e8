pub mod frame_measurement_source;
pub mod laplacian_blur_scorer;
pub mod min_size_face_filter;
pub mod trace_measurement_source;
