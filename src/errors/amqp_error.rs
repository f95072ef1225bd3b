use thiserror::Error;

// custom error, based on 'thiserror' library
#[derive(Error, Debug)]
pub enum AmqpError {
    #[error("amqp_client connection error")]
    Connection(lapin::Error),
    #[error("amqp_client channel error")]
    Channel(lapin::Error),
    #[error("amqp_client queue declare error")]
    QueueDeclare(lapin::Error),
    #[error("amqp_client queue bind error")]
    QueueBind(lapin::Error),
    #[error("amqp_client publish error")]
    Publish(lapin::Error),
    #[error("amqp_client publish not confirmed error: {0}")]
    NotConfirmed(String),
    #[error("amqp_client consume error")]
    Consume(lapin::Error),
    #[error("amqp_client ack error")]
    Ack(lapin::Error),
    #[error("amqp_client close error")]
    Close(lapin::Error),
    #[error("amqp_client not initialized error: {0}")]
    Uninitialized(String),
}
