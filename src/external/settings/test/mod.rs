mod file_test;
