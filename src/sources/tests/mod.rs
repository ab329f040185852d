mod commoncrawl_tests;
