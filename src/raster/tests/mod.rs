mod crop_tests;
