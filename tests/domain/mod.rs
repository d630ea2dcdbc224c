mod band_test;
mod feedback_test;
