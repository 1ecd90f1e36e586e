mod support;
mod task_tests;
