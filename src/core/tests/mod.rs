mod event_scheduler_tests;
