mod event_test;
