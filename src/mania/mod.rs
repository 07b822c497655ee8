pub use self::reconstructor::ManiaReconstructor;

mod reconstructor;
