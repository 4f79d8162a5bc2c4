pub mod skeleton_annotator;
