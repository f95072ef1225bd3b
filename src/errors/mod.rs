pub mod amqp_error;
